fn main() {
    // Bindings come from proc-macros in uniffi_bindings.rs, whose records mirror
    // model.rs, so no UDL file is involved
    for path in ["src/uniffi_bindings.rs", "src/model.rs", "build.rs"] {
        println!("cargo:rerun-if-changed={}", path);
    }
}
