use std::io;

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed=build.rs");

    // Linker script only matters for the STM32 binary.
    #[cfg(feature = "hardware")]
    {
        use std::path::PathBuf;

        let out = std::env::var_os("OUT_DIR")
            .map(PathBuf::from)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "OUT_DIR not set"))?;
        std::fs::write(out.join("memory.x"), include_bytes!("../../memory.x"))?;

        println!("cargo:rustc-link-search={}", out.display());
        println!("cargo:rerun-if-changed=../../memory.x");
    }

    Ok(())
}
