//! ZobristKeys position key host

use zobrist_keys::uci::UCI;

fn main() {
    println!("ZobristKeys v{} - position key host", env!("CARGO_PKG_VERSION"));
    println!("Type 'isready' to load the table, 'key' to print the current key, 'quit' to exit");

    let mut uci = UCI::new();
    uci.run();
}
