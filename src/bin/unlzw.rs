//! unlzw binary entry point

fn main() {
    if let Err(err) = unlzw::cli::run_cli() {
        eprintln!("unlzw: {err:#}");
        // Decode failures carry the historical uncompress exit status;
        // anything else (bad arguments, missing files) exits 1.
        let code = err
            .downcast_ref::<unlzw::Error>()
            .map_or(1, unlzw::Error::exit_code);
        std::process::exit(code);
    }
}
