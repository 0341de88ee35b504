//! Rust source artifact: one module of path constants per model.
//!
//! The counterpart of the original generator's metadata enums: every entry
//! becomes a `pub const` named by its underscore-joined path, carrying the
//! dotted path string and the resolved type names. Each generated file is
//! self-contained (the `FieldPathMeta` struct is repeated per file) so
//! artifacts can be dropped into any build without a support crate.

use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;

use super::EmitError;
use crate::pipeline::ModelExpansion;
use crate::version::MODELMETA_VERSION;

/// Render the generated module source for one model.
pub fn render(model: &ModelExpansion) -> Result<String, EmitError> {
    let header = format!(
        "Generated by modelmeta v{} for `{}`. Do not edit.",
        MODELMETA_VERSION,
        model.identity.qualified_name(),
    );

    let consts: Vec<TokenStream> = model
        .entries
        .iter()
        .map(|entry| {
            let ident = const_ident(&entry.identifier());
            let path = entry.dotted();
            let value_type = entry.value_type.qualified_name();
            let element = match &entry.element_type {
                Some(element) => {
                    let name = element.qualified_name();
                    quote! { Some(#name) }
                }
                None => quote! { None },
            };
            let model_valued = entry.model_valued;
            let first_degree = entry.first_degree();
            quote! {
                #[allow(non_upper_case_globals)]
                pub const #ident: FieldPathMeta = FieldPathMeta {
                    path: #path,
                    value_type: #value_type,
                    element_type: #element,
                    model: #model_valued,
                    first_degree: #first_degree,
                };
            }
        })
        .collect();

    let tokens = quote! {
        #![doc = #header]

        /// Metadata for one reachable field path.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct FieldPathMeta {
            /// Dotted path from the root model.
            pub path: &'static str,
            /// Qualified name of the field's declared type.
            pub value_type: &'static str,
            /// Qualified name of the element type, for collection fields.
            pub element_type: Option<&'static str>,
            /// Whether the path continues into a scanned model.
            pub model: bool,
            /// Whether the field sits directly on the root model.
            pub first_degree: bool,
        }

        #(#consts)*
    };

    let file = syn::parse2(tokens).map_err(|source| EmitError::InvalidCodegen {
        model: model.identity.qualified_name(),
        source,
    })?;
    Ok(prettyplease::unparse(&file))
}

/// Underscore-joined paths are usually valid identifiers; the exceptions are
/// Rust keywords (a field legitimately named `type`, say) and `$` signs,
/// which Java permits in identifiers. Keywords become raw identifiers, the
/// handful that cannot be raw get a trailing underscore, and any other
/// offending character is replaced with `_`.
fn const_ident(name: &str) -> Ident {
    let sanitized: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if let Ok(ident) = syn::parse_str::<Ident>(&sanitized) {
        return ident;
    }
    if matches!(sanitized.as_str(), "self" | "Self" | "super" | "crate" | "_") {
        return Ident::new(&format!("{sanitized}_"), Span::call_site());
    }
    Ident::new_raw(&sanitized, Span::call_site())
}
