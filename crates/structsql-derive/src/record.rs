//! Record derive macro implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Result};

use crate::attrs::{get_field_attrs, get_struct_attrs};

struct RecordField {
    ident: syn::Ident,
    name: String,
    column: Option<String>,
    id: bool,
    bytes: bool,
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Record can only be derived for structs",
            ));
        }
    };

    let struct_attrs = get_struct_attrs(&input)?;

    let mut fields = Vec::with_capacity(named.len());
    let mut id_field: Option<&syn::Field> = None;
    for field in named {
        let attrs = get_field_attrs(field)?;
        if attrs.skip {
            continue;
        }
        if attrs.id {
            if id_field.is_some() {
                return Err(syn::Error::new_spanned(
                    field,
                    "only one field can be marked #[structsql(id)]",
                ));
            }
            id_field = Some(field);
        }
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        fields.push(RecordField {
            name: ident.unraw().to_string(),
            ident,
            column: attrs.column,
            id: attrs.id,
            bytes: attrs.bytes,
        });
    }

    let type_name = name.unraw().to_string();
    let field_count = fields.len();

    // Types with generics or lifetimes are not always 'static, so they are
    // keyed by their full type path instead of TypeId.
    let type_key = if input.generics.params.is_empty() {
        quote! { ::structsql::TypeKey::of::<Self>() }
    } else {
        quote! { ::structsql::TypeKey::named::<Self>() }
    };

    let table_name = match &struct_attrs.table {
        Some(table) => quote! { ::core::option::Option::Some(#table) },
        None => quote! { ::core::option::Option::None },
    };

    let field_defs = fields.iter().map(|f| {
        let field_name = &f.name;
        let column = f.column.as_ref().map(|c| quote! { .column(#c) });
        let id = f.id.then(|| quote! { .primary_key() });
        quote! { ::structsql::FieldDef::new(#field_name) #column #id }
    });

    let value_arms = fields.iter().enumerate().map(|(i, f)| {
        let ident = &f.ident;
        if f.bytes {
            quote! {
                #i => ::structsql::Value::Bytes(::std::borrow::Cow::Borrowed(
                    ::core::convert::AsRef::<[u8]>::as_ref(&self.#ident),
                ))
            }
        } else {
            quote! { #i => ::structsql::ToValue::to_value(&self.#ident) }
        }
    });

    let zero_checks: Vec<TokenStream> = fields
        .iter()
        .map(|f| {
            let ident = &f.ident;
            if f.bytes {
                quote! { ::core::convert::AsRef::<[u8]>::as_ref(&self.#ident).is_empty() }
            } else {
                quote! { ::structsql::ToValue::is_zero(&self.#ident) }
            }
        })
        .collect();

    let zero_arms = zero_checks.iter().enumerate().map(|(i, check)| {
        quote! { #i => #check }
    });

    Ok(quote! {
        impl #impl_generics ::structsql::Record for #name #ty_generics #where_clause {
            fn type_key(&self) -> ::structsql::TypeKey {
                #type_key
            }

            fn type_name(&self) -> ::core::option::Option<&str> {
                ::core::option::Option::Some(#type_name)
            }

            fn table_name(&self) -> ::core::option::Option<&str> {
                #table_name
            }

            fn fields(&self) -> ::std::borrow::Cow<'_, [::structsql::FieldDef<'_>]> {
                const FIELDS: &[::structsql::FieldDef<'static>] = &[#(#field_defs),*];
                ::std::borrow::Cow::Borrowed(FIELDS)
            }

            fn field_count(&self) -> usize {
                #field_count
            }

            fn field_value(&self, index: usize) -> ::structsql::Value<'_> {
                match index {
                    #(#value_arms,)*
                    _ => ::structsql::Value::Null,
                }
            }

            fn field_is_zero(&self, index: usize) -> bool {
                match index {
                    #(#zero_arms,)*
                    _ => true,
                }
            }
        }

        impl #impl_generics ::structsql::Reflect for #name #ty_generics #where_clause {
            fn reflect(&self) -> ::structsql::Reflected<'_> {
                ::structsql::Reflected::Record(self)
            }
        }

        impl #impl_generics ::structsql::ToValue for #name #ty_generics #where_clause {
            fn to_value(&self) -> ::structsql::Value<'_> {
                ::structsql::Value::Record(::structsql::DynRecord::from_record(self))
            }

            fn is_zero(&self) -> bool {
                true #(&& #zero_checks)*
            }
        }
    })
}
