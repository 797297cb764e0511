use std::{
    env,
    fs::read_to_string,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    process,
    time::Instant,
};

use objj_lexer::{
    get_line_at_position, init_tracing, language, Error, ErrorTip, Lexer, LexerOptions, Token,
    TokenKind,
};

const USAGE: &str = "usage: objj-lexer [--reset-on-newline] [--kind <Kind.Name>] <file>";

struct Args {
    options: LexerOptions,
    kind: Option<TokenKind>,
    file: PathBuf,
}

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    };

    let source = match read_to_string(&args.file) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error: failed to read {}: {}", args.file.display(), err);
            process::exit(1);
        }
    };

    if !language::matches_filename(&args.file) && !language::analyse_text(&source) {
        tracing::warn!(file = %args.file.display(), "input does not look like {}", language::NAME);
    }

    let lexer = match Lexer::with_options(args.options) {
        Ok(lexer) => lexer,
        Err(error) => {
            display_config_error(&error);
            process::exit(1);
        }
    };

    let start = Instant::now();
    let tokens: Vec<Token> = lexer.tokens(&source).collect();
    tracing::info!(count = tokens.len(), elapsed = ?start.elapsed(), "tokenized");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for token in tokens
        .iter()
        .filter(|token| args.kind.map_or(true, |kind| token.kind.is_a(kind)))
    {
        if writeln!(out, "{}", token).is_err() {
            process::exit(1);
        }
    }
    if out.flush().is_err() {
        process::exit(1);
    }
    drop(out);

    let errors: Vec<&Token> = tokens
        .iter()
        .filter(|token| token.kind == TokenKind::Error)
        .collect();
    for token in &errors {
        display_error(token, &args.file, &source);
    }
    if !errors.is_empty() {
        process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut options = LexerOptions::default();
    let mut kind = None;
    let mut file = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", USAGE);
                process::exit(0);
            }
            "--reset-on-newline" => options.newline_resets_state = true,
            "--kind" => {
                let name = iter.next().ok_or("Error: --kind expects a token kind")?;
                let parsed: TokenKind = name.parse().map_err(|error: Error| match error.get_tip() {
                    ErrorTip::None => format!("Error: {}", error),
                    tip => format!("Error: {} ({})", error, tip),
                })?;
                kind = Some(parsed);
            }
            _ if file.is_none() => file = Some(PathBuf::from(arg)),
            _ => return Err(String::from("Error: incorrect arguments provided")),
        }
    }

    let file = file.ok_or("Error: no input file")?;
    Ok(Args {
        options,
        kind,
        file,
    })
}

fn display_config_error(error: &Error) {
    match error.get_state() {
        Some(state) => eprintln!("Error: {} in state `{}`", error.get_error_name(), state),
        None => eprintln!("Error: {}", error.get_error_name()),
    }
    eprintln!("  {}", error);
    if let ErrorTip::Suggestion(tip) = error.get_tip() {
        eprintln!("  ({})", tip);
    }
}

fn display_error(token: &Token, file: &Path, source: &str) {
    /*
        Error: unrecognised character `@`
        -> main.j
           |
        20 | var a = @;
           | --------^
    */

    let Some((line, line_text, line_pos)) = get_line_at_position(source, token.offset) else {
        return;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    eprintln!("Error: unrecognised character {:?}", token.value);
    eprintln!("-> {}", file.as_os_str().to_string_lossy());
    eprintln!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    eprintln!("{} | {}", line_string, line_text_removed.trim_end());

    let column = line_text[..line_pos].chars().count();
    let arrows = column.saturating_sub(removed_whitespace) + 1;

    eprintln!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
