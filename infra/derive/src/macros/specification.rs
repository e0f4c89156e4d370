use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{
    Attribute, Data, DeriveInput, Expr, ExprLit, Field, Fields, GenericArgument, Ident, Lit,
    LitStr, Meta, PathArguments, Type,
};

/// How the binder treats a field, decided from the declared type alone.
#[derive(Debug, PartialEq, Eq)]
enum Kind {
    Scalar(&'static str),
    List(&'static str),
    Unsupported(String),
}

struct FieldMeta<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    name: String,
    kind: Kind,
    default: Option<LitStr>,
    flag: Option<LitStr>,
    help: Option<String>,
}

#[derive(Default)]
struct FieldAttrs {
    default: Option<LitStr>,
    flag: Option<LitStr>,
    skip: bool,
}

pub fn expand_derive(input: &DeriveInput) -> TokenStream {
    let name = &input.ident;

    let Data::Struct(data) = &input.data else {
        return syn::Error::new_spanned(
            name,
            "`Specification` can only be derived for structs with named fields",
        )
        .to_compile_error();
    };
    let Fields::Named(named) = &data.fields else {
        return syn::Error::new_spanned(
            name,
            "`Specification` can only be derived for structs with named fields",
        )
        .to_compile_error();
    };

    let mut fields = Vec::with_capacity(named.named.len());
    for field in &named.named {
        match parse_field(field) {
            Ok(Some(meta)) => fields.push(meta),
            Ok(None) => {},
            Err(err) => return err.to_compile_error(),
        }
    }

    let specs = fields.iter().map(field_spec);
    let assign = generate_assign(&fields);
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        #[automatically_derived]
        impl #impl_generics ::sconfig::Specification for #name #ty_generics #where_clause {
            fn fields() -> ::std::vec::Vec<::sconfig::FieldSpec> {
                ::std::vec![#(#specs),*]
            }

            #assign
        }
    }
}

fn parse_field(field: &Field) -> syn::Result<Option<FieldMeta<'_>>> {
    let Some(ident) = field.ident.as_ref() else {
        return Err(syn::Error::new_spanned(field, "expected a named field"));
    };

    let attrs = parse_attrs(&field.attrs)?;
    if attrs.skip {
        return Ok(None);
    }

    Ok(Some(FieldMeta {
        ident,
        ty: &field.ty,
        name: ident.unraw().to_string(),
        kind: classify(&field.ty),
        default: attrs.default,
        flag: attrs.flag,
        help: doc_summary(&field.attrs),
    }))
}

fn parse_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut parsed = FieldAttrs::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("sconfig")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                if parsed.default.is_some() {
                    return Err(meta.error("duplicate `default` key"));
                }
                parsed.default = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("flag") {
                if parsed.flag.is_some() {
                    return Err(meta.error("duplicate `flag` key"));
                }
                parsed.flag = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("skip") {
                parsed.skip = true;
            } else {
                return Err(meta.error("unsupported sconfig key, expected `default`, `flag` or `skip`"));
            }
            Ok(())
        })?;
    }

    Ok(parsed)
}

/// First non-empty line of the field's doc comment.
fn doc_summary(attrs: &[Attribute]) -> Option<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit { lit: Lit::Str(text), .. }) => Some(text.value()),
                _ => None,
            },
            _ => None,
        })
        .map(|line| line.trim().to_owned())
        .find(|line| !line.is_empty())
}

fn classify(ty: &Type) -> Kind {
    if let Some(kind) = scalar_kind(ty) {
        return Kind::Scalar(kind);
    }
    if let Some(kind) = vec_element(ty).and_then(scalar_kind) {
        return Kind::List(kind);
    }
    Kind::Unsupported(type_name(ty))
}

fn scalar_kind(ty: &Type) -> Option<&'static str> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    let segment = path.path.segments.last()?;
    if !matches!(segment.arguments, PathArguments::None) {
        return None;
    }

    let kind = match segment.ident.to_string().as_str() {
        "String" => "Text",
        "bool" => "Bool",
        "i8" => "I8",
        "i16" => "I16",
        "i32" => "I32",
        "i64" => "I64",
        "isize" => "Isize",
        "u8" => "U8",
        "u16" => "U16",
        "u32" => "U32",
        "u64" => "U64",
        "usize" => "Usize",
        "f32" => "F32",
        "f64" => "F64",
        "Duration" => "Duration",
        _ => return None,
    };
    Some(kind)
}

fn vec_element(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Vec" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

fn type_name(ty: &Type) -> String {
    quote!(#ty)
        .to_string()
        .replace(" < ", "<")
        .replace("< ", "<")
        .replace(" <", "<")
        .replace(" >", ">")
        .replace(" :: ", "::")
        .replace(" ,", ",")
}

fn field_spec(field: &FieldMeta<'_>) -> TokenStream {
    let name = &field.name;
    let kind = match &field.kind {
        Kind::Scalar(kind) => {
            let kind = format_ident!("{kind}");
            quote! { ::sconfig::FieldKind::Scalar(::sconfig::ScalarKind::#kind) }
        },
        Kind::List(kind) => {
            let kind = format_ident!("{kind}");
            quote! { ::sconfig::FieldKind::List(::sconfig::ScalarKind::#kind) }
        },
        Kind::Unsupported(ty) => quote! { ::sconfig::FieldKind::Unsupported(#ty) },
    };
    let default = optional_str(field.default.as_ref().map(LitStr::value));
    let flag = optional_str(field.flag.as_ref().map(LitStr::value));
    let help = optional_str(field.help.clone());

    quote! {
        ::sconfig::FieldSpec {
            name: #name,
            kind: #kind,
            default: #default,
            flag: #flag,
            help: #help,
        }
    }
}

fn optional_str(value: Option<String>) -> TokenStream {
    value.map_or_else(
        || quote! { ::std::option::Option::None },
        |value| quote! { ::std::option::Option::Some(#value) },
    )
}

/// Coerces every supported field before writing any of them, so a failed
/// coercion leaves the record as it was.
fn generate_assign(fields: &[FieldMeta<'_>]) -> TokenStream {
    let supported: Vec<(usize, &FieldMeta<'_>)> = fields
        .iter()
        .enumerate()
        .filter(|(_, field)| !matches!(field.kind, Kind::Unsupported(_)))
        .collect();

    if supported.is_empty() {
        return quote! {
            fn assign(&mut self, _resolved: &::sconfig::Resolved) -> ::sconfig::Result<()> {
                ::std::result::Result::Ok(())
            }
        };
    }

    let coerce = supported.iter().map(|(index, field)| {
        let local = format_ident!("value_{index}");
        let ty = field.ty;
        let name = &field.name;
        quote! { let #local = resolved.coerce::<#ty>(#name)?; }
    });
    let write = supported.iter().map(|(index, field)| {
        let local = format_ident!("value_{index}");
        let ident = field.ident;
        quote! {
            if let ::std::option::Option::Some(value) = #local {
                self.#ident = value;
            }
        }
    });

    quote! {
        fn assign(&mut self, resolved: &::sconfig::Resolved) -> ::sconfig::Result<()> {
            #(#coerce)*
            #(#write)*
            ::std::result::Result::Ok(())
        }
    }
}
