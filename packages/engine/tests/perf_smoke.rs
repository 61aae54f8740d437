use cellflow_engine::{Cell, Color24, SimulationCore};

#[test]
fn perf_smoke_step() {
    let mut sim = SimulationCore::new(128, 64);
    sim.enable_perf_metrics(true);
    for x in 0..128 {
        sim.set_solid(x, 0);
    }
    sim.paint_circle(64, 40, 12, Cell::water(512), Color24::BLACK);
    sim.set_source(10, 50, 256);
    sim.set_light_source(100, 60, Color24::WHITE);

    // 15 ticks owed, capped at 10
    sim.step(0.25);
    let stats = sim.get_perf_stats();
    assert!(stats.step_ms() >= 0.0);
    assert_eq!(stats.water_ticks(), 10);
    assert!(stats.wet_cells() > 0);
    assert!(sim.light().field().iter().any(|c| !c.is_zero()));
}
