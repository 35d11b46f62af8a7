//! Attribute parsing for the Queryable derive macro.
//!
//! Parses the `#[query(...)]` field attributes.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Ident, Lit, Meta, Result, Token,
};

/// How a queryable field is exposed to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// String field: `#[query(String)]`
    String,
    /// Number field: `#[query(Number)]`
    Number,
    /// Date-typed field: `#[query(Timestamp)]`
    Timestamp,
    /// Boolean field: `#[query(Bool)]`
    Bool,
}

const EXPECTED_KINDS: &str = "String, Number, Timestamp, Bool";

impl FieldKind {
    /// Parse a field kind from an identifier.
    pub fn from_ident(ident: &Ident) -> Result<Self> {
        Self::from_name(&ident.to_string(), ident.span())
    }

    /// Parse a field kind from its name, in either case.
    pub fn from_name(name: &str, span: Span) -> Result<Self> {
        match name {
            "String" | "string" | "str" => Ok(FieldKind::String),
            "Number" | "number" => Ok(FieldKind::Number),
            "Timestamp" | "timestamp" | "Date" | "date" => Ok(FieldKind::Timestamp),
            "Bool" | "bool" | "boolean" => Ok(FieldKind::Bool),
            other => Err(Error::new(
                span,
                format!(
                    "unknown query field kind: '{}'. Expected one of: {}",
                    other, EXPECTED_KINDS
                ),
            )),
        }
    }
}

/// Field-level attributes from `#[query(...)]`.
#[derive(Debug, Clone, Default)]
pub struct QueryAttr {
    /// How this field is exposed, if at all.
    pub kind: Option<FieldKind>,
    /// Exclude this field.
    pub skip: bool,
    /// Field name used in queries (default: the Rust field name).
    pub rename: Option<String>,
}

fn string_literal(expr: &syn::Expr, what: &str) -> Result<syn::LitStr> {
    match expr {
        syn::Expr::Lit(syn::ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s.clone()),
        other => Err(Error::new(
            other.span(),
            format!("{what} must be a string literal"),
        )),
    }
}

impl Parse for QueryAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = QueryAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                // Kind identifier: query(String), query(Number), etc.
                Meta::Path(p) => {
                    if p.is_ident("skip") {
                        attr.skip = true;
                    } else if let Some(ident) = p.get_ident() {
                        attr.kind = Some(FieldKind::from_ident(ident)?);
                    } else {
                        return Err(Error::new(
                            p.span(),
                            format!("expected field kind ({EXPECTED_KINDS}) or skip"),
                        ));
                    }
                }

                // rename = "customName" or ty = "timestamp"
                Meta::NameValue(nv) => {
                    if nv.path.is_ident("rename") {
                        attr.rename = Some(string_literal(&nv.value, "rename")?.value());
                    } else if nv.path.is_ident("ty") {
                        let lit = string_literal(&nv.value, "ty")?;
                        attr.kind = Some(FieldKind::from_name(&lit.value(), lit.span())?);
                    } else {
                        return Err(Error::new(
                            nv.path.span(),
                            "unknown attribute. Expected: rename or ty",
                        ));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        format!(
                            "unknown query attribute. Expected: {EXPECTED_KINDS}, skip, rename = \"...\", or ty = \"...\""
                        ),
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Extract `#[query(...)]` attributes from a field's attributes.
pub fn parse_query_attrs(attrs: &[Attribute]) -> Result<QueryAttr> {
    for attr in attrs {
        if attr.path().is_ident("query") {
            return attr.parse_args::<QueryAttr>();
        }
    }
    Ok(QueryAttr::default())
}
