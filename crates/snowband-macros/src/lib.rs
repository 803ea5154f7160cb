//! Derive macros for snowband flux records.

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Fields, Lit, Meta};

/// Derive a column-oriented `*Timeseries` companion for a per-timestep flux record.
///
/// Every field of the record must be `f64`. The companion holds one `Vec<f64>`
/// per field and gets `with_capacity`, `push`, `len`, `is_empty` and a
/// by-name `column` lookup. The record itself gains `field_names()`.
///
/// `#[fluxes(timeseries_name = "Name")]` overrides the companion's name
/// (default: `{Record}Timeseries`).
#[proc_macro_derive(Fluxes, attributes(fluxes))]
pub fn derive_fluxes(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let record = &input.ident;

    let ts_name =
        timeseries_name(&input).unwrap_or_else(|| format_ident!("{}Timeseries", record));

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return syn::Error::new_spanned(
                    record,
                    "Fluxes requires a struct with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(record, "Fluxes can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    let mut idents = Vec::with_capacity(fields.len());
    for field in fields {
        if !is_f64(&field.ty) {
            return syn::Error::new_spanned(&field.ty, "Fluxes fields must all be f64")
                .to_compile_error()
                .into();
        }
        if let Some(ident) = field.ident.as_ref() {
            idents.push(ident);
        }
    }

    let Some(first) = idents.first() else {
        return syn::Error::new_spanned(record, "Fluxes record needs at least one field")
            .to_compile_error()
            .into();
    };

    let names: Vec<String> = idents.iter().map(|i| i.to_string()).collect();

    let expanded = quote! {
        /// Column-oriented series of per-timestep flux records.
        #[derive(Debug, Clone, Default)]
        pub struct #ts_name {
            #(pub #idents: Vec<f64>,)*
        }

        impl #ts_name {
            /// Pre-allocate every column for `n` timesteps.
            pub fn with_capacity(n: usize) -> Self {
                Self {
                    #(#idents: Vec::with_capacity(n),)*
                }
            }

            /// Append one timestep.
            pub fn push(&mut self, f: &#record) {
                #(self.#idents.push(f.#idents);)*
            }

            /// Number of stored timesteps.
            pub fn len(&self) -> usize {
                self.#first.len()
            }

            /// Returns `true` if no timestep has been stored.
            pub fn is_empty(&self) -> bool {
                self.#first.is_empty()
            }

            /// Look up a column by field name.
            pub fn column(&self, name: &str) -> Option<&[f64]> {
                match name {
                    #(#names => Some(&self.#idents),)*
                    _ => None,
                }
            }
        }

        impl #record {
            /// Field names in declaration order.
            pub fn field_names() -> &'static [&'static str] {
                &[#(#names),*]
            }
        }
    };

    expanded.into()
}

fn timeseries_name(input: &DeriveInput) -> Option<proc_macro2::Ident> {
    let attr = input.attrs.iter().find(|a| a.path().is_ident("fluxes"))?;
    let nested = attr
        .parse_args_with(syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated)
        .ok()?;
    nested.into_iter().find_map(|meta| match meta {
        Meta::NameValue(nv) if nv.path.is_ident("timeseries_name") => match &nv.value {
            syn::Expr::Lit(syn::ExprLit {
                lit: Lit::Str(s), ..
            }) => Some(format_ident!("{}", s.value())),
            _ => None,
        },
        _ => None,
    })
}

fn is_f64(ty: &syn::Type) -> bool {
    matches!(ty, syn::Type::Path(p) if p.qself.is_none() && p.path.is_ident("f64"))
}
