//!
//! shimc-macros
//! The format string is scanned at compile time with the same rules the runtime
//! scanner uses, so the argument count is checked before anything runs and each
//! argument is converted with the constructor its verb expects.
//!

extern crate proc_macro;
use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{
    parse::{self, Parse, ParseStream},
    parse_macro_input,
    punctuated::Punctuated,
    Expr, LitByteStr, LitStr, Token,
};

/// `printf!("val=%d end", 42)` writes to stdout and evaluates to
/// `shimc::Result<usize>`.
#[proc_macro]
pub fn printf(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as Input);
    cformat(&input, |args, format| {
        quote! { ::shimc::vprintf(#format, #args) }
    })
}

#[proc_macro]
pub fn eprintf(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as Input);
    cformat(&input, |args, format| {
        quote! { ::shimc::vfprintf(&mut ::std::io::stderr(), #format, #args) }
    })
}

/// `fprintf!(&mut writer, "...", ...)` for any `std::io::Write`.
#[proc_macro]
pub fn fprintf(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as BufInput);
    let dest = &input.dest;
    let ident = shimc_ident("out");
    cformat(&input.input, |args, format| {
        quote! {
            let #ident = #dest;
            ::shimc::vfprintf(#ident, #format, #args)
        }
    })
}

/// `sprintf!(&mut buf, "...", ...)` formats into a byte buffer and
/// zero-terminates it.
#[proc_macro]
pub fn sprintf(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as BufInput);
    let dest = &input.dest;
    let ident = shimc_ident("buf");
    cformat(&input.input, |args, format| {
        quote! {
            let #ident: &mut [u8] = #dest;
            ::shimc::vsprintf(#ident, #format, #args)
        }
    })
}

fn shimc_ident(name: &str) -> syn::Ident {
    syn::Ident::new(&format!("__shimc_{}", name), Span::mixed_site())
}

fn cformat<F>(input: &Input, f: F) -> TokenStream
where
    F: FnOnce(proc_macro2::TokenStream, LitByteStr) -> proc_macro2::TokenStream,
{
    let format = input.format.value();
    let verbs = parse(format.as_bytes());

    let argc: usize = input.args.len();
    let required_argc: usize = verbs.len();

    if argc != required_argc {
        return parse::Error::new(
            input.format.span(),
            &format!(
                "format string required {} arguments but {} were supplied",
                required_argc, argc
            ),
        )
        .to_compile_error()
        .into();
    }

    let mut args = vec![];
    for (verb, arg) in verbs.iter().zip(input.args.iter()) {
        match verb {
            Verb::Int => args.push(quote!(::shimc::Arg::int(#arg))),
            Verb::Double => args.push(quote!(::shimc::Arg::double(#arg))),
            Verb::Str => args.push(quote!(::shimc::Arg::str(#arg))),
        }
    }

    let literal = LitByteStr::new(format.as_bytes(), input.format.span());
    let ident = shimc_ident("args");
    let cursor = quote!(&mut ::shimc::Args::new(&#ident));
    let call = f(cursor, literal);
    let tokens = quote! {
        {
            let #ident: [::shimc::Arg<'_>; #argc] = [#(#args),*];
            #call
        }
    };
    tokens.into()
}

struct Input {
    format: LitStr,
    _comma: Option<Token![,]>,
    args: Punctuated<Expr, Token![,]>,
}

impl Parse for Input {
    fn parse(input: ParseStream) -> parse::Result<Self> {
        let format = input.parse()?;
        if input.is_empty() {
            Ok(Input {
                format,
                _comma: None,
                args: Punctuated::new(),
            })
        } else {
            Ok(Input {
                format,
                _comma: input.parse()?,
                args: Punctuated::parse_terminated(input)?,
            })
        }
    }
}

struct BufInput {
    dest: Expr,
    input: Input,
}

impl Parse for BufInput {
    fn parse(input: ParseStream) -> parse::Result<Self> {
        let dest = input.parse()?;
        let _: Token![,] = input.parse()?;
        let input = Input::parse(input)?;
        Ok(BufInput { dest, input })
    }
}

#[derive(Debug, PartialEq)]
enum Verb {
    Int,
    Double,
    Str,
}

// Mirrors the runtime scanner: only the verbs that pull an argument matter here.
fn parse(format: &[u8]) -> Vec<Verb> {
    let at = |pos: usize| format.get(pos).copied().unwrap_or(0);
    let mut verbs = vec![];
    let mut pos = 0;
    loop {
        match at(pos) {
            0 => break,
            b'%' => pos += 1,
            _ => {
                pos += 1;
                continue;
            }
        }
        match at(pos) {
            0 => break,
            b'd' => verbs.push(Verb::Int),
            b's' => verbs.push(Verb::Str),
            b'f' => verbs.push(Verb::Double),
            b'.' => {
                pos += 1;
                while at(pos).is_ascii_digit() {
                    pos += 1;
                }
                if at(pos) != b'f' {
                    break;
                }
                verbs.push(Verb::Double);
            }
            _ => {}
        }
        pos += 1;
    }
    verbs
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(parse(b"plain"), Vec::<Verb>::new());
        assert_eq!(
            parse(b"%d %s %f %.3f"),
            vec![Verb::Int, Verb::Str, Verb::Double, Verb::Double]
        );
        assert_eq!(parse(b"100%% %x"), Vec::<Verb>::new());
        assert_eq!(parse(b"%.2x %.f"), Vec::<Verb>::new());
        assert_eq!(parse(b"%d %.2x %s"), vec![Verb::Int]);
        assert_eq!(parse(b"%.1f%.1"), vec![Verb::Double]);
        assert_eq!(parse(b"%d\0%d"), vec![Verb::Int]);
        assert_eq!(parse(b"trailing %"), Vec::<Verb>::new());
    }
}
