//! Derive macro for bulk INSERT rows.
//!
//! This crate provides the `#[derive(BulkRow)]` macro, which describes every
//! field of a struct to the bulk assembler in `oxide-bulk-core`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Expr, Fields, Ident, Lit, LitBool, Meta, Token};

/// Derives `BulkRow` for a struct with named fields.
///
/// # Attributes
///
/// - `#[table(name = "table_name")]` - Specifies the SQL table name (optional,
///   defaults to snake_case of struct name)
///
/// # Field Attributes
///
/// - `#[column(name = "column_name")]` - Specifies the SQL column name
///   (optional, defaults to field name)
/// - `#[column(primary_key)]` - Marks the field as primary key; a blank `id`
///   primary key is left to the database
/// - `#[column(autoincrement)]` - The database generates the value, the field
///   is never written. `autoincrement = false` switches this off again.
/// - `#[column(default = "expr")]` - Declares a column default; blank values
///   are left to the database
/// - `#[column(ignore)]` - The field is not a column
/// - `#[column(relation)]` - The field holds a related record
/// - `#[column(foreign_key = "field")]` - The field holds a related record
///   joined through `field`
/// - `#[column(created_at)]`, `#[column(updated_at)]` - Timestamp fields.
///   Fields named `created_at` and `updated_at` are detected without the
///   attribute.
///
/// Fields marked `ignore`, `relation` or `foreign_key` do not need to
/// implement `ToSqlValue`; every other field must implement it and `Clone`.
#[proc_macro_derive(BulkRow, attributes(table, column))]
pub fn derive_bulk_row(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_bulk_row_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn derive_bulk_row_impl(input: DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let table_name = get_table_name(&input.attrs, struct_name)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "BulkRow derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "BulkRow derive only supports structs",
            ));
        }
    };

    let mut descriptors: Vec<TokenStream2> = Vec::new();
    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let attrs = parse_column_attrs(&field.attrs)?;
        descriptors.push(field_descriptor(field_name, &attrs));
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::oxide_bulk_core::row::BulkRow for #struct_name #ty_generics #where_clause {
            fn table_name(&self) -> ::core::option::Option<&str> {
                ::core::option::Option::Some(#table_name)
            }

            fn fields(
                &self,
            ) -> ::core::result::Result<
                ::std::vec::Vec<::oxide_bulk_core::row::FieldDescriptor>,
                ::oxide_bulk_core::error::ShapeError,
            > {
                ::core::result::Result::Ok(::std::vec![#(#descriptors),*])
            }
        }

        impl #impl_generics #struct_name #ty_generics #where_clause {
            /// The SQL table name.
            pub const TABLE_NAME: &'static str = #table_name;
        }
    };

    Ok(expanded)
}

fn field_descriptor(field_name: &Ident, attrs: &ColumnAttrs) -> TokenStream2 {
    let name = field_name.to_string();
    let column = attrs.name.clone().unwrap_or_else(|| name.clone());

    // Non-column fields are described without reading their value.
    let value = if attrs.ignore || attrs.relation || attrs.foreign_key.is_some() {
        quote! { ::oxide_bulk_core::value::SqlValue::Null }
    } else {
        quote! {
            ::oxide_bulk_core::value::ToSqlValue::to_sql_value(
                ::core::clone::Clone::clone(&self.#field_name)
            )
        }
    };

    let mut setters: Vec<TokenStream2> = Vec::new();
    if attrs.primary_key {
        setters.push(quote! { .primary_key() });
    }
    if let Some(enabled) = attrs.autoincrement {
        setters.push(quote! { .auto_increment(#enabled) });
    }
    if let Some(key) = &attrs.foreign_key {
        setters.push(quote! { .foreign_key(#key) });
    }
    if attrs.relation {
        setters.push(quote! { .relation() });
    }
    if attrs.ignore {
        setters.push(quote! { .ignored() });
    }
    if let Some(default) = &attrs.default_expr {
        setters.push(quote! { .default_value(#default) });
    }
    match attrs.timestamp {
        Some(Timestamp::Created) => setters.push(quote! {
            .timestamp(::core::option::Option::Some(::oxide_bulk_core::row::TimestampKind::Created))
        }),
        Some(Timestamp::Updated) => setters.push(quote! {
            .timestamp(::core::option::Option::Some(::oxide_bulk_core::row::TimestampKind::Updated))
        }),
        None => {}
    }

    quote! {
        ::oxide_bulk_core::row::FieldDescriptor::new(#name, #value)
            .column(#column)
            #(#setters)*
    }
}

#[derive(Clone, Copy)]
enum Timestamp {
    Created,
    Updated,
}

#[derive(Default)]
struct ColumnAttrs {
    name: Option<String>,
    primary_key: bool,
    autoincrement: Option<bool>,
    default_expr: Option<String>,
    ignore: bool,
    relation: bool,
    foreign_key: Option<String>,
    timestamp: Option<Timestamp>,
}

fn get_table_name(attrs: &[Attribute], struct_name: &Ident) -> syn::Result<String> {
    for attr in attrs {
        if attr.path().is_ident("table") {
            let mut table_name = None;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    table_name = Some(parse_str_value(&meta)?);
                    Ok(())
                } else {
                    Err(meta.error("unsupported table attribute"))
                }
            })?;
            if let Some(name) = table_name {
                return Ok(name);
            }
        }
    }
    // Default to snake_case of struct name
    Ok(to_snake_case(&struct_name.to_string()))
}

fn parse_column_attrs(attrs: &[Attribute]) -> syn::Result<ColumnAttrs> {
    let mut result = ColumnAttrs::default();

    for attr in attrs {
        if attr.path().is_ident("column") {
            // Handle empty attribute like #[column]
            if matches!(attr.meta, Meta::Path(_)) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("primary_key") {
                    result.primary_key = true;
                } else if meta.path.is_ident("autoincrement") {
                    let enabled = if meta.input.peek(Token![=]) {
                        let value: LitBool = meta.value()?.parse()?;
                        value.value
                    } else {
                        true
                    };
                    result.autoincrement = Some(enabled);
                } else if meta.path.is_ident("ignore") {
                    result.ignore = true;
                } else if meta.path.is_ident("relation") {
                    result.relation = true;
                } else if meta.path.is_ident("created_at") {
                    result.timestamp = Some(Timestamp::Created);
                } else if meta.path.is_ident("updated_at") {
                    result.timestamp = Some(Timestamp::Updated);
                } else if meta.path.is_ident("name") {
                    result.name = Some(parse_str_value(&meta)?);
                } else if meta.path.is_ident("default") {
                    result.default_expr = Some(parse_str_value(&meta)?);
                } else if meta.path.is_ident("foreign_key") {
                    result.foreign_key = Some(parse_str_value(&meta)?);
                } else {
                    return Err(meta.error("unsupported column attribute"));
                }
                Ok(())
            })?;
        }
    }

    Ok(result)
}

fn parse_str_value(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<String> {
    let value: Expr = meta.value()?.parse()?;
    if let Expr::Lit(lit) = &value {
        if let Lit::Str(s) = &lit.lit {
            return Ok(s.value());
        }
    }
    Err(syn::Error::new_spanned(value, "expected a string literal"))
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}
