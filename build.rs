//! Build script compiling the C reference kernel.
//!
//! The C kernel is the "compiler-generated loop" built by a C toolchain. It is
//! only enabled for GCC, MSVC and Apple Clang; vanilla Clang shares Rust's LLVM
//! backend and would not add a distinct code generator to the comparison.

use std::env;

fn main() {
    println!("cargo:rustc-check-cfg=cfg(c_implementation_active)");

    let build = cc::Build::new();
    let compiler = match build.try_get_compiler() {
        Ok(compiler) => compiler,
        Err(_) => {
            println!("cargo:warning=No C compiler found. c-original kernel disabled.");
            return;
        }
    };

    let compiler_name = if compiler.is_like_clang() {
        let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
        if target_os != "macos" {
            println!("cargo:warning=Vanilla Clang detected. c-original kernel disabled (needs GCC, MSVC or Apple Clang).");
            return;
        }
        "Apple Clang"
    } else if compiler.is_like_gnu() {
        "GCC"
    } else if compiler.is_like_msvc() {
        "MSVC"
    } else {
        println!("cargo:warning=Unsupported C compiler. c-original kernel disabled.");
        return;
    };

    let mut build = cc::Build::new();

    let c_files = match glob::glob("src/**/*.c") {
        Ok(paths) => paths.filter_map(|entry| entry.ok()).collect::<Vec<_>>(),
        Err(e) => {
            println!("cargo:warning=Bad glob pattern for C sources: {}", e);
            return;
        }
    };
    if c_files.is_empty() {
        return;
    }

    for file in &c_files {
        println!("cargo:rerun-if-changed={}", file.display());
        build.file(file);
    }

    // No fast-math: the C loop must keep strict left-to-right summation.
    build
        .opt_level(3)
        .flag_if_supported("-fno-fast-math")
        .flag_if_supported("-ffp-contract=off");

    build.compile("dot_kernels_c");

    println!("cargo:rustc-cfg=c_implementation_active");
    println!("cargo:rustc-env=C_COMPILER_NAME={}", compiler_name);
}
