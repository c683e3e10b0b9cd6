use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::Verbosity;
use log::{debug, info};
use notation_converter::notation;
use notation_converter::notation::error::{LexError, ParseError};
use notation_converter::notation::syntax::expression_tree::Node;
use std::io;
use std::io::{BufRead, Write};

const PROMPT: &str = "
Please enter an arithmetic expression in infix form. The expression may
contain integer numbers, variable names, parentheses, and the operators
^ (exponentiation), * (multiplication), / (division), + (addition), and
- (subtraction). Variable names may contain lower-case letters and
upper-case letters, but may not contain any other type of character. The
expression must not contain any spaces.

Example:
   (a+3)+var^(b+282*c)

>> ";

/// Renders an infix expression in fully-parenthesized, postfix and prefix form
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    /// The expression to convert. Read from standard input when omitted
    expression: Option<String>,

    /// The longest expression accepted, in characters
    #[clap(long, default_value_t = 1000)]
    max_length: usize,

    /// Only print the given forms, in the given order
    #[clap(long = "form", value_enum)]
    forms: Vec<Form>,

    /// Also print the parse tree of the expression
    #[clap(long)]
    tree: bool,

    #[clap(flatten)]
    verbose: Verbosity,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum Form {
    Parenthesized,
    Postfix,
    Prefix,
}

impl Form {
    const ALL: [Form; 3] = [Form::Parenthesized, Form::Postfix, Form::Prefix];

    fn header(&self) -> &'static str {
        match self {
            Form::Parenthesized => "The fully-parenthesized form of the expression:",
            Form::Postfix => "The expression with postfix binary operators:",
            Form::Prefix => "The expression with prefix binary operators:",
        }
    }

    fn render(&self, tree: &Node) -> Result<String> {
        match self {
            Form::Parenthesized => notation::fully_parenthesized(tree),
            Form::Postfix => notation::postfix(tree),
            Form::Prefix => notation::prefix(tree),
        }
    }
}

fn main() -> Result<()> {
    let args = Arguments::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();
    debug!("{:?}", args);

    let expression = match args.expression {
        Some(expression) => expression,
        None => prompt_for_expression()?,
    };
    let length = expression.chars().count();
    if length > args.max_length {
        bail!(
            "Expression is {} characters long, the limit is {}",
            length,
            args.max_length
        );
    }

    let tree = match notation::parse_expression(&expression) {
        Ok(tree) => tree,
        Err(error) => {
            if let Some(position) = error_position(&error) {
                eprintln!("{}\n{}", expression, caret_line(position));
            }
            return Err(error);
        }
    };
    info!("parsed {:?}", expression);

    if args.tree {
        println!("\n{}", tree);
    }
    let forms = if args.forms.is_empty() {
        Form::ALL.to_vec()
    } else {
        args.forms
    };
    for form in forms {
        println!("\n{}", form.header());
        println!("     {}", form.render(&tree)?);
    }
    println!();

    Ok(())
}

fn prompt_for_expression() -> Result<String> {
    print!("{}", PROMPT);
    io::stdout().flush().context("Failed to write prompt")?;

    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Error receiving input!")?;
    if read == 0 {
        bail!("Error receiving input!");
    }
    Ok(trim_line(&line).to_string())
}

fn trim_line(line: &str) -> &str {
    line.trim_end_matches(&['\r', '\n'][..])
}

/// Character offset of the lex or parse failure behind the given error, if known.
fn error_position(error: &anyhow::Error) -> Option<usize> {
    if let Some(error) = error.downcast_ref::<LexError>() {
        return Some(error.position());
    }
    error
        .downcast_ref::<ParseError>()
        .and_then(ParseError::position)
}

fn caret_line(position: usize) -> String {
    format!("{}^", " ".repeat(position))
}
