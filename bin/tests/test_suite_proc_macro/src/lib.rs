use quote::{format_ident, quote};
use syn::{parse_macro_input, LitStr};

/// Generates one `#[test]` per `.lox` fixture below the given directory (relative to
/// `bin/tests`). Each test hands the fixture's contents to an `expect_fixture` function that
/// must be in scope at the call site.
#[proc_macro]
pub fn generate_tests(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let fixture_dir = parse_macro_input!(input as LitStr).value();
    let tests_dir = format!("{}/..", env!("CARGO_MANIFEST_DIR"));
    let root_dir = format!("{tests_dir}/{fixture_dir}");

    let mut fixtures = walkdir::WalkDir::new(&root_dir)
        .sort_by_file_name()
        .into_iter()
        .flatten()
        .filter(|entry| entry.path().extension() == Some("lox".as_ref()))
        .peekable();

    if fixtures.peek().is_none() {
        let message = format!("no .lox fixtures found in {root_dir}");
        return quote! { compile_error!(#message); }.into();
    }

    let tests = fixtures.map(|entry| {
        let fixture_path = entry.path().to_string_lossy().to_string();
        let relative_path = entry.path().strip_prefix(&root_dir).unwrap_or(entry.path());
        let test_ident = format_ident!(
            "{}",
            relative_path.with_extension("").to_string_lossy().replace(['/', '-', '.'], "_")
        );
        quote! {
            #[test]
            fn #test_ident() {
                expect_fixture(include_str!(#fixture_path));
            }
        }
    });

    quote! { #(#tests)* }.into()
}
