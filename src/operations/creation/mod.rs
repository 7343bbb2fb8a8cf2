mod make_coil;
mod make_tape;
mod make_tape_block;

pub use make_coil::{CoilData, MakeCoil};
pub use make_tape::{MakeTape, TapeData, TapeParams};
pub use make_tape_block::{MakeTapeBlock, TapeBlockData};
