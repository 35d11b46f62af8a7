//! Implementation of the `#[derive(Queryable)]` macro.
//!
//! Generates a `Queryable` impl plus one field-name constant per exposed
//! field, so callers write `Event::TITLE` instead of `"title"`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, PathArguments, Result, Type};

use super::attrs::{parse_query_attrs, FieldKind};

/// Main implementation of the Queryable derive macro.
pub fn queryable_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Queryable can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Queryable can only be derived for structs",
            ))
        }
    };

    let mut field_matches: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_query_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        // Unannotated fields are not queryable
        let Some(kind) = attrs.kind else {
            continue;
        };

        let query_name = attrs.rename.unwrap_or_else(|| field_name.to_string());
        let const_name = format_ident!("{}", to_screaming_snake_case(&query_name));

        field_constants.push(quote! {
            /// Field name constant for type-safe queries.
            pub const #const_name: &'static str = #query_name;
        });

        let value_expr = if is_option(&field.ty) {
            let inner = value_expr(kind, quote! { value });
            quote! {
                match &self.#field_name {
                    ::core::option::Option::Some(value) => #inner,
                    ::core::option::Option::None => ::sexton_query::Value::None,
                }
            }
        } else {
            value_expr(kind, quote! { &self.#field_name })
        };

        field_matches.push(quote! {
            #query_name => #value_expr,
        });
    }

    Ok(quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::sexton_query::Queryable for #struct_name #ty_generics #where_clause {
            fn field_value(&self, field: &str) -> ::sexton_query::Value<'_> {
                match field {
                    #(#field_matches)*
                    _ => ::sexton_query::Value::None,
                }
            }
        }
    })
}

/// Builds the `Value` for a field, given an expression of type `&FieldType`.
fn value_expr(kind: FieldKind, reference: TokenStream) -> TokenStream {
    match kind {
        FieldKind::String => quote! {
            ::sexton_query::Value::String(#reference)
        },
        FieldKind::Number => quote! {
            ::sexton_query::Value::Number(::sexton_query::Number::from(*#reference))
        },
        FieldKind::Timestamp => quote! {
            ::sexton_query::Value::Timestamp(
                ::sexton_query::QueryTimestamp::query_timestamp(#reference)
            )
        },
        FieldKind::Bool => quote! {
            ::sexton_query::Value::Bool(*#reference)
        },
    }
}

/// Returns `true` for `Option<_>`, `std::option::Option<_>` and friends.
fn is_option(ty: &Type) -> bool {
    match ty {
        Type::Path(path) if path.qself.is_none() => path
            .path
            .segments
            .last()
            .is_some_and(|seg| {
                seg.ident == "Option" && matches!(seg.arguments, PathArguments::AngleBracketed(_))
            }),
        _ => false,
    }
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' || c == '.' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = true;
        }
    }

    result
}
