/// Display version information
pub fn display_version() {
    println!("Loop Trace v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Switching loop detection from broadcast trace dumps.");
}
