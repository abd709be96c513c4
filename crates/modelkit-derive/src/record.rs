use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Field, Fields, ext::IdentExt};

// derive_record
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    match expand(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let ident = &input.ident;
    let ident_str = ident.unraw().to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Struct(data) = &input.data else {
        return Err(Error::new_spanned(
            ident,
            "Record can only be derived for structs with named fields",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(Error::new_spanned(
            &data.fields,
            "Record can only be derived for structs with named fields",
        ));
    };

    let mut tracked = Vec::new();
    for field in &named.named {
        if !is_skipped(field)? {
            tracked.push(field);
        }
    }

    let declarations = tracked.iter().map(|field| {
        let ty = &field.ty;
        let name = property_name(field);

        quote! {
            ::modelkit::model::FieldModel::of::<#ty>(#name)
        }
    });

    let get_arms = tracked.iter().map(|field| {
        let field_ident = &field.ident;
        let ty = &field.ty;
        let name = property_name(field);

        quote! {
            #name => Some(<#ty as ::modelkit::traits::FieldValue>::to_value(&self.#field_ident)),
        }
    });

    let set_arms = tracked.iter().map(|field| {
        let field_ident = &field.ident;
        let ty = &field.ty;
        let name = property_name(field);

        quote! {
            #name => {
                self.#field_ident = <#ty as ::modelkit::traits::FieldValue>::from_value(value)
                    .map_err(|source| ::modelkit::error::FieldError::value(
                        <Self as ::modelkit::traits::Path>::PATH,
                        property,
                        source,
                    ))?;

                Ok(())
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::modelkit::traits::Path for #ident #ty_generics #where_clause {
            const PATH: &'static str = concat!(module_path!(), "::", #ident_str);
        }

        impl #impl_generics ::modelkit::traits::Record for #ident #ty_generics #where_clause {
            fn declare_fields() -> Vec<::modelkit::model::FieldModel> {
                vec![#(#declarations),*]
            }

            fn get_value(&self, property: &str) -> Option<::modelkit::value::Value> {
                match property {
                    #(#get_arms)*
                    _ => None,
                }
            }

            #[allow(unused_variables)]
            fn set_value(
                &mut self,
                property: &str,
                value: ::modelkit::value::Value,
            ) -> Result<(), ::modelkit::error::FieldError> {
                match property {
                    #(#set_arms)*
                    _ => Err(::modelkit::error::FieldError::unknown(
                        <Self as ::modelkit::traits::Path>::PATH,
                        property,
                    )),
                }
            }
        }

        impl #impl_generics ::modelkit::traits::FieldValue for #ident #ty_generics #where_clause {
            fn kind() -> ::modelkit::model::FieldKind {
                ::modelkit::model::FieldKind::Record(::modelkit::model::RecordCodec::of::<Self>())
            }

            fn to_value(&self) -> ::modelkit::value::Value {
                ::modelkit::traits::record_to_value(self)
            }

            fn from_value(
                value: ::modelkit::value::Value,
            ) -> Result<Self, ::modelkit::error::ValueError> {
                ::modelkit::traits::record_from_value(value)
            }
        }
    })
}

fn property_name(field: &Field) -> String {
    field
        .ident
        .as_ref()
        .map(|ident| ident.unraw().to_string())
        .unwrap_or_default()
}

// #[record(skip)]
fn is_skipped(field: &Field) -> syn::Result<bool> {
    let mut skip = false;

    for attr in field.attrs.iter().filter(|a| a.path().is_ident("record")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported record attribute; expected `skip`"))
            }
        })?;
    }

    Ok(skip)
}
