mod cells;
mod liquid;
mod pointers;
