//! `#[derive(Describe)]` for field-catalog.
//!
//! Field attributes (`#[catalog(...)]`):
//! - `rename = "..."`: wire name
//! - `description = "..."`: falls back to the field's doc comment
//! - `default = "..."`: raw literal, never parsed
//! - `skip`: not declared
//!
//! Container attributes: `type_name = "..."`, `opaque`, `rename_all = "..."`.
//!
//! serde attributes are honored for the serialized wire name: field
//! `rename = "..."` / `rename(serialize = "...")`, `skip` / `skip_serializing`,
//! and container `rename_all` (either form). `catalog` wins over `serde`, and
//! an explicit field rename wins over `rename_all`. Raw identifiers lose
//! their `r#` prefix.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{
    parse_macro_input, parse_quote, Attribute, Data, DeriveInput, Expr, ExprLit, Fields,
    GenericParam, Lit, LitStr, Meta,
};

mod case;

use case::RenameRule;

#[proc_macro_derive(Describe, attributes(catalog))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// EXPANSION
// ————————————————————————————————————————————————————————————————————————————

fn expand(mut input: DeriveInput) -> syn::Result<TokenStream2> {
    let name = input.ident.clone();
    let container = ContainerAttrs::parse(&input.attrs)?;

    if let Some(lt) = input.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lt,
            "Describe types must be 'static; lifetime parameters are not supported",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        Data::Enum(data) => {
            let msg = "Describe can only be derived for structs";
            return Err(syn::Error::new_spanned(data.enum_token, msg));
        }
        Data::Union(data) => {
            let msg = "Describe can only be derived for structs";
            return Err(syn::Error::new_spanned(data.union_token, msg));
        }
    };

    let field_defs = match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .map(|f| {
                let ident = f.ident.as_ref().map(|i| i.unraw().to_string()).unwrap_or_default();
                field_def(ident, f, container.rename_all)
            })
            .collect::<syn::Result<Vec<_>>>()?,
        Fields::Unnamed(unnamed) => unnamed
            .unnamed
            .iter()
            .enumerate()
            .map(|(i, f)| field_def(i.to_string(), f, None))
            .collect::<syn::Result<Vec<_>>>()?,
        Fields::Unit => Vec::new(),
    };
    let field_defs: Vec<TokenStream2> = field_defs.into_iter().flatten().collect();

    let type_name = type_name_tokens(&name, &input, container.type_name.as_ref());

    // every type parameter must itself be describable
    let type_params: Vec<_> = input.generics.type_params().map(|p| p.ident.clone()).collect();
    {
        let where_clause = input.generics.make_where_clause();
        for p in &type_params {
            where_clause.predicates.push(parse_quote!(#p: ::field_catalog::Describe));
        }
    }
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let body = if container.opaque {
        quote! { ::field_catalog::Shape::opaque::<Self>(#type_name) }
    } else {
        quote! {
            ::field_catalog::Shape::composite::<Self>(#type_name, ::std::vec![#(#field_defs),*])
        }
    };

    Ok(quote! {
        impl #impl_generics ::field_catalog::Describe for #name #ty_generics #where_clause {
            fn shape() -> ::field_catalog::Shape {
                #body
            }
        }
    })
}

/// `None` when the field is skipped. `rename_all` only reaches named fields.
fn field_def(
    ident: String,
    field: &syn::Field,
    rename_all: Option<RenameRule>,
) -> syn::Result<Option<TokenStream2>> {
    let attrs = FieldAttrs::parse(&field.attrs)?;
    if attrs.skip {
        return Ok(None);
    }
    let ty = &field.ty;
    let mut def = quote! {
        ::field_catalog::FieldDef::new(#ident, <#ty as ::field_catalog::Describe>::shape)
    };
    let explicit = attrs.rename.or(attrs.serde_rename);
    if let Some(wire) = explicit.or_else(|| rename_all.map(|rule| rule.apply(&ident))) {
        def = quote! { #def.wire_name(#wire) };
    }
    if let Some(text) = attrs.description.or(attrs.doc) {
        def = quote! { #def.description(#text) };
    }
    if let Some(literal) = attrs.default {
        def = quote! { #def.default_value(#literal) };
    }
    Ok(Some(def))
}

/// Struct ident, with the parameters' canonical names for generic structs.
fn type_name_tokens(
    name: &syn::Ident,
    input: &DeriveInput,
    explicit: Option<&String>,
) -> TokenStream2 {
    if let Some(explicit) = explicit {
        return quote! { #explicit };
    }
    let base = name.to_string();
    let params: Vec<_> = input
        .generics
        .params
        .iter()
        .filter_map(|p| match p {
            GenericParam::Type(t) => Some(&t.ident),
            _ => None,
        })
        .collect();
    if params.is_empty() {
        return quote! { #base };
    }
    quote! {
        ::std::format!(
            "{}<{}>",
            #base,
            [#(<#params as ::field_catalog::Describe>::shape().type_name.into_owned()),*]
                .join(", "),
        )
    }
}

// ————————————————————————————————————————————————————————————————————————————
// ATTRIBUTES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Default)]
struct ContainerAttrs {
    type_name: Option<String>,
    opaque: bool,
    rename_all: Option<RenameRule>,
}

impl ContainerAttrs {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        let mut serde_rename_all = None;
        for attr in attrs {
            if attr.path().is_ident("catalog") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("type_name") {
                        out.type_name = Some(meta.value()?.parse::<LitStr>()?.value());
                    } else if meta.path.is_ident("opaque") {
                        out.opaque = true;
                    } else if meta.path.is_ident("rename_all") {
                        let lit = meta.value()?.parse::<LitStr>()?;
                        out.rename_all = Some(rename_rule(&lit)?);
                    } else {
                        return Err(meta.error("unsupported catalog container attribute"));
                    }
                    Ok(())
                })?;
            } else if attr.path().is_ident("serde") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename_all") {
                        if let Some(lit) = serialized_name(&meta)? {
                            serde_rename_all = Some(rename_rule(&lit)?);
                        }
                        Ok(())
                    } else {
                        skip_serde_meta(&meta)
                    }
                })?;
            }
        }
        out.rename_all = out.rename_all.or(serde_rename_all);
        Ok(out)
    }
}

#[derive(Default)]
struct FieldAttrs {
    rename: Option<String>,
    serde_rename: Option<String>,
    description: Option<String>,
    doc: Option<String>,
    default: Option<String>,
    skip: bool,
}

impl FieldAttrs {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        let mut doc_lines = Vec::new();
        for attr in attrs {
            if attr.path().is_ident("catalog") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename") {
                        out.rename = Some(meta.value()?.parse::<LitStr>()?.value());
                    } else if meta.path.is_ident("description") {
                        out.description = Some(meta.value()?.parse::<LitStr>()?.value());
                    } else if meta.path.is_ident("default") {
                        out.default = Some(meta.value()?.parse::<LitStr>()?.value());
                    } else if meta.path.is_ident("skip") {
                        out.skip = true;
                    } else {
                        return Err(meta.error("unsupported catalog field attribute"));
                    }
                    Ok(())
                })?;
            } else if attr.path().is_ident("serde") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename") {
                        if let Some(lit) = serialized_name(&meta)? {
                            out.serde_rename = Some(lit.value());
                        }
                        Ok(())
                    } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                        out.skip = true;
                        Ok(())
                    } else {
                        skip_serde_meta(&meta)
                    }
                })?;
            } else if attr.path().is_ident("doc") {
                if let Meta::NameValue(nv) = &attr.meta {
                    if let Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) = &nv.value {
                        let line = s.value().trim().to_string();
                        if !line.is_empty() {
                            doc_lines.push(line);
                        }
                    }
                }
            }
        }
        if !doc_lines.is_empty() {
            out.doc = Some(doc_lines.join(" "));
        }
        Ok(out)
    }
}

// ---- serde grammar ----

/// `key = "x"` or `key(serialize = "x", deserialize = "y")`. `None` when only
/// the deserialize side is named.
fn serialized_name(meta: &ParseNestedMeta) -> syn::Result<Option<LitStr>> {
    if meta.input.peek(syn::Token![=]) {
        return Ok(Some(meta.value()?.parse::<LitStr>()?));
    }
    let mut out = None;
    meta.parse_nested_meta(|inner| {
        let lit = inner.value()?.parse::<LitStr>()?;
        if inner.path.is_ident("serialize") {
            out = Some(lit);
        }
        Ok(())
    })?;
    Ok(out)
}

/// Consume a serde item this derive does not interpret.
fn skip_serde_meta(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(syn::Token![=]) {
        meta.value()?.parse::<Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        content.parse::<TokenStream2>()?;
    }
    Ok(())
}

fn rename_rule(lit: &LitStr) -> syn::Result<RenameRule> {
    RenameRule::from_name(&lit.value())
        .ok_or_else(|| syn::Error::new_spanned(lit, "unknown rename_all rule"))
}
