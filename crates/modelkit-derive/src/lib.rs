use proc_macro::TokenStream;

mod record;

/// Derive `Path`, `Record`, and `FieldValue` for a struct with named fields.
///
/// Every field type must implement `FieldValue`. Fields marked
/// `#[record(skip)]` are not declared and never tracked. The type must also
/// implement `Model` (an empty `impl Model for T {}` is enough) so it can be
/// nested inside other records.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input.into()).into()
}
