//! epg-wib: full guide with programme times shifted to WIB

// Use mimalloc for faster memory allocation (Linux, macOS)
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::process::ExitCode;

use epg_wib::Variant;

fn main() -> ExitCode {
    epg_wib::run_cli(Variant::Plain)
}
