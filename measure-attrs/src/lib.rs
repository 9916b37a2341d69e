mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the `measure_error::ErrorKind` trait for the given struct.
///
/// The struct must be a unit struct or have named fields. The report is customized with the
/// `error` attribute:
///
/// ```
/// use measure_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = format!("unknown units `{}`", name),
///     labels = ["this name"],
///     help = "units must be defined before they are used",
/// )]
/// pub struct UnknownUnits {
///     name: String,
/// }
/// ```
///
/// | Tag       | Description                                                                   |
/// | --------- | ----------------------------------------------------------------------------- |
/// | `message` | The message displayed at the top of the report.                               |
/// | `labels`  | An iterable of strings, one label per span of the error, in the same order.   |
/// | `help`    | Optional help text describing what the user can do to fix the error.          |
/// | `note`    | Optional note with additional context.                                        |
///
/// Each tag accepts an expression. The fields of the struct are in scope by name when the
/// expression is evaluated. Empty label strings produce a highlighted span with no message.
///
/// The generated code refers to `ariadne` and `measure_error`, so the deriving crate must depend
/// on both.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl measure_error::ErrorKind for #name {
            #target
        }
    }.into()
}
