use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::spanned::Spanned;
use syn::visit::{self, Visit};
use syn::{
    parse_macro_input, parse_quote, FnArg, Ident, ItemFn, Lifetime, ReturnType, Type, TypeReference,
};

/// Rewrites `async fn f(..) -> Outcome<V, E>` into
/// `fn f(..) -> Pending<impl Future<Output = Outcome<V, E>>>`.
///
/// `#[pending(catching)]` wraps the body with `Pending::catching`, so a panic
/// in the body resolves to a failure.
#[proc_macro_attribute]
pub fn pending(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let catching = match parse_args(TokenStream::from(attr)) {
        Ok(catching) => catching,
        Err(err) => return err.to_compile_error().into(),
    };

    // Parse the input tokens into a syntax tree
    let input = parse_macro_input!(item as ItemFn);

    match expand(input, catching) {
        Ok(expanded) => proc_macro::TokenStream::from(expanded),
        Err(err) => err.to_compile_error().into(),
    }
}

fn parse_args(attr: TokenStream) -> syn::Result<bool> {
    if attr.is_empty() {
        return Ok(false);
    }

    let arg: Ident = syn::parse2(attr)?;
    if arg != "catching" {
        return Err(syn::Error::new(
            arg.span(),
            "unknown #[pending] argument, expected `catching`",
        ));
    }
    Ok(true)
}

fn expand(mut func: ItemFn, catching: bool) -> syn::Result<TokenStream> {
    if func.sig.asyncness.is_none() {
        return Err(syn::Error::new(
            func.sig.fn_token.span,
            "#[pending] can only be applied to an `async fn`",
        ));
    }

    let output = match &func.sig.output {
        ReturnType::Type(_, ty) => outcome_type(ty)?,
        ReturnType::Default => {
            return Err(syn::Error::new(
                func.sig.ident.span(),
                "#[pending] functions must return an `Outcome`",
            ))
        }
    };

    check_generics(&func)?;
    check_inputs(&func)?;

    let body = &func.block;
    let lift = if catching {
        quote!(::outcome::Pending::catching)
    } else {
        quote!(::outcome::Pending::new)
    };
    let block = parse_quote!({
        #lift(async move {
            let outcome: #output = #body;
            outcome
        })
    });

    func.sig.asyncness = None;
    func.sig.output = parse_quote!(
        -> ::outcome::Pending<impl ::core::future::Future<Output = #output>>
    );
    func.block = Box::new(block);

    Ok(quote!(#func))
}

// Accept `Outcome<..>` under any path, reject everything else early so the
// error points at the signature instead of the generated body.
fn outcome_type(ty: &Type) -> syn::Result<Type> {
    let span = match ty {
        Type::Path(path) => match path.path.segments.last() {
            Some(last) if last.ident == "Outcome" => return Ok(ty.clone()),
            Some(last) => last.ident.span(),
            None => ty.span(),
        },
        _ => ty.span(),
    };

    Err(syn::Error::new(
        span,
        "#[pending] functions must return an `Outcome`",
    ))
}

// The returned future outlives the call, it cannot be tied to a caller lifetime.
fn check_generics(func: &ItemFn) -> syn::Result<()> {
    match func.sig.generics.lifetimes().next() {
        Some(def) => Err(syn::Error::new(
            def.lifetime.ident.span(),
            "#[pending] functions cannot have lifetime parameters, the returned future cannot borrow",
        )),
        None => Ok(()),
    }
}

fn check_inputs(func: &ItemFn) -> syn::Result<()> {
    for input in &func.sig.inputs {
        match input {
            FnArg::Receiver(receiver) => {
                return Err(syn::Error::new(
                    receiver.self_token.span,
                    "#[pending] does not support `self` parameters",
                ))
            }
            FnArg::Typed(arg) => {
                let mut borrows = Borrows::default();
                borrows.visit_type(&arg.ty);
                if let Some(span) = borrows.first {
                    return Err(syn::Error::new(
                        span,
                        "#[pending] arguments must be owned, the returned future cannot borrow them",
                    ));
                }
            }
        }
    }
    Ok(())
}

/// Finds the first reference or lifetime in a type, `'static` excluded.
#[derive(Default)]
struct Borrows {
    first: Option<Span>,
}

impl<'ast> Visit<'ast> for Borrows {
    fn visit_type_reference(&mut self, reference: &'ast TypeReference) {
        if self.first.is_some() {
            return;
        }
        match &reference.lifetime {
            Some(lifetime) if lifetime.ident == "static" => {
                visit::visit_type(self, &reference.elem)
            }
            _ => self.first = Some(reference.and_token.spans[0]),
        }
    }

    fn visit_lifetime(&mut self, lifetime: &'ast Lifetime) {
        if self.first.is_none() && lifetime.ident != "static" {
            self.first = Some(lifetime.ident.span());
        }
    }
}
