//! epg-wib-sports: sports channels and programmes only, times in WIB

// Use mimalloc for faster memory allocation (Linux, macOS)
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::process::ExitCode;

use epg_wib::Variant;

fn main() -> ExitCode {
    epg_wib::run_cli(Variant::Sports)
}
