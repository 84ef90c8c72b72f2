//! Derive macro implementation for automatic Shrinkable trait derivation
//!
//! The generated `shrink` offers, field by field, a copy of the value with that
//! one field replaced by each of the field's own candidates.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Data, DeriveInput, Error, Fields, GenericParam, Ident, Member, Result, Variant,
    parse_macro_input, parse_quote,
};

/// Main entry point for the Shrinkable derive macro
pub fn derive_shrinkable_impl(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate_shrinkable_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Generate the Shrinkable implementation for the given input
fn generate_shrinkable_impl(input: &DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;

    let mut generics = input.generics.clone();
    add_trait_bounds(&mut generics);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let shrink_body = match &input.data {
        Data::Struct(data_struct) => generate_struct_body(&data_struct.fields),
        Data::Enum(data_enum) => {
            generate_enum_body(&data_enum.variants.iter().collect::<Vec<_>>())
        }
        Data::Union(_) => {
            return Err(Error::new_spanned(
                input,
                "Shrinkable derive is not supported for unions",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics ::quickshrink::Shrinkable for #name #ty_generics
        #where_clause
        {
            fn shrink(
                &self,
                out: &::quickshrink::Emitter<'_, Self>,
            ) -> ::core::result::Result<(), ::quickshrink::Cancelled> {
                #shrink_body
            }
        }
    })
}

/// Add necessary trait bounds to generic parameters
fn add_trait_bounds(generics: &mut syn::Generics) {
    for param in &mut generics.params {
        if let GenericParam::Type(ref mut type_param) = *param {
            type_param.bounds.push(parse_quote!(::quickshrink::Shrinkable));
            type_param.bounds.push(parse_quote!(::core::clone::Clone));
        }
    }
}

/// Shrink each field of `self` in turn, rebuilding the struct by cloning and
/// overwriting the one field.
fn generate_struct_body(fields: &Fields) -> TokenStream {
    let members = fields.members();
    let types = fields.iter().map(|field| &field.ty);

    let steps = members.zip(types).map(|(member, ty)| {
        quote! {
            ::quickshrink::Shrinkable::shrink(
                &self.#member,
                &out.map(|candidate: #ty| {
                    let mut next = ::core::clone::Clone::clone(self);
                    next.#member = candidate;
                    next
                }),
            )?;
        }
    });

    let discard = unused_out(fields.is_empty());

    quote! {
        #discard
        #(#steps)*
        ::core::result::Result::Ok(())
    }
}

/// Silences the unused `out` parameter when no field is shrunk.
fn unused_out(no_fields: bool) -> TokenStream {
    if no_fields {
        quote! { let _ = out; }
    } else {
        TokenStream::new()
    }
}

/// Match on the variant and shrink its fields in turn, keeping the variant.
fn generate_enum_body(variants: &[&Variant]) -> TokenStream {
    if variants.is_empty() {
        return quote! {
            let _ = out;
            match *self {}
        };
    }

    let discard = unused_out(variants.iter().all(|variant| variant.fields.is_empty()));
    let arms = variants.iter().map(|variant| generate_variant_arm(variant));

    quote! {
        #discard
        match self {
            #(#arms)*
        }
        ::core::result::Result::Ok(())
    }
}

fn generate_variant_arm(variant: &Variant) -> TokenStream {
    let variant_name = &variant.ident;
    let members: Vec<Member> = variant.fields.members().collect();
    let bindings: Vec<Ident> = (0..members.len())
        .map(|i| format_ident!("__field{}", i))
        .collect();

    let steps = variant.fields.iter().enumerate().map(|(replaced, field)| {
        let ty = &field.ty;
        let binding = &bindings[replaced];
        let rebuilt = members.iter().zip(&bindings).enumerate().map(|(i, (member, other))| {
            if i == replaced {
                quote! { #member: candidate }
            } else {
                quote! { #member: ::core::clone::Clone::clone(#other) }
            }
        });

        quote! {
            ::quickshrink::Shrinkable::shrink(
                #binding,
                &out.map(|candidate: #ty| Self::#variant_name { #(#rebuilt),* }),
            )?;
        }
    });

    quote! {
        Self::#variant_name { #(#members: #bindings),* } => {
            #(#steps)*
        }
    }
}
