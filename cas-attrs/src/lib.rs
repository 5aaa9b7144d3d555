mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the [`ErrorKind`] trait for the given struct or enum.
///
/// The information of the error is customized using the `error` attribute:
///
/// ```
/// use ariadne::Fmt;
/// use cas_attrs::ErrorKind;
/// use cas_error::{Error, EXPR};
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = "unexpected end of file",
///     labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
/// )]
/// pub struct UnexpectedEof;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = "unknown function",
///     labels = [format!("`{}` is not defined", name)],
///     help = "try `sin`, `cos`, or `exp`",
/// )]
/// pub struct UnknownFunction {
///     name: String,
/// }
///
/// let err = Error::new(vec![4..7], UnknownFunction { name: "foo".to_string() });
/// assert!(err.report_to_string("1 + foo(x)").contains("unknown function"));
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `message`   | The message displayed at the top of the error when it is displayed.          |
/// | `labels`    | An array with the text of the labels pointing to each span of the error.     |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
///
/// Each tag accepts an expression whose value implements [`ToString`] (for `labels`, each element
/// of the array). The expressions can refer to `self`. For structs with named fields, the fields
/// are also in scope by name. Tuple structs are not supported.
///
/// [`ErrorKind`]: https://docs.rs/cas-error/latest/cas_error/trait.ErrorKind.html
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl ::cas_error::ErrorKind for #name {
            #target
        }
    }.into()
}
