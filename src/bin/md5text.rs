// md5text.rs - print MD5 digests of text arguments, files or stdin

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::process::ExitCode;

use argh::FromArgs;
use textdigest::{Md5, Md5Digest, Result, TextDigesterBuilder};

#[derive(FromArgs)]
/// Print the MD5 digest of each text argument (UTF-8), each --file, or stdin when neither is given
struct Args {
    /// print uppercase hex
    #[argh(switch, short = 'u')]
    upper: bool,

    /// file to hash (repeatable)
    #[argh(option, short = 'f')]
    file: Vec<String>,

    /// expected digest; requires exactly one input and exits 1 on mismatch
    #[argh(option)]
    check: Option<String>,

    /// text to hash
    #[argh(positional)]
    texts: Vec<String>,
}

/// One thing to hash and the label printed next to its digest.
enum Input {
    Text(String),
    File(String),
    Stdin,
}

impl Input {
    fn label(&self) -> &str {
        match self {
            Input::Text(text) => text.as_str(),
            Input::File(path) => path.as_str(),
            Input::Stdin => "-",
        }
    }

    /// Digest of the input; `stdin` is only read for [`Input::Stdin`].
    fn md5<R: Read>(&self, stdin: &mut R) -> Result<Md5Digest> {
        let mut hasher = Md5::new();
        match self {
            Input::Text(text) => hasher.update(text.as_bytes()),
            Input::File(path) => {
                io::copy(&mut BufReader::new(File::open(path)?), &mut hasher)?;
            }
            Input::Stdin => {
                io::copy(stdin, &mut hasher)?;
            }
        }
        Ok(hasher.finalize())
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Args = argh::from_env();
    let mut out = io::stdout().lock();
    match run(args, io::stdin().lock(), &mut out) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("md5text: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run<R: Read, W: Write>(args: Args, mut stdin: R, out: &mut W) -> Result<bool> {
    let digester = TextDigesterBuilder::new().uppercase(args.upper).build();

    let mut inputs: Vec<Input> = args.texts.into_iter().map(Input::Text).collect();
    inputs.extend(args.file.into_iter().map(Input::File));
    if inputs.is_empty() {
        inputs.push(Input::Stdin);
    }
    log::debug!("hashing {} input(s)", inputs.len());

    if let Some(expected) = args.check {
        let expected = Md5Digest::from_hex(expected.trim())?;
        if inputs.len() != 1 {
            eprintln!("md5text: --check needs exactly one input, got {}", inputs.len());
            return Ok(false);
        }
        let ok = inputs[0].md5(&mut stdin)? == expected;
        writeln!(out, "{}: {}", inputs[0].label(), if ok { "OK" } else { "FAILED" })?;
        return Ok(ok);
    }

    for input in &inputs {
        let digest = input.md5(&mut stdin)?;
        writeln!(out, "{}  {}", digest.to_hex(digester.hex_case()), input.label())?;
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use textdigest::Error;

    fn args(texts: &[&str], check: Option<&str>) -> Args {
        Args {
            upper: false,
            file: Vec::new(),
            check: check.map(str::to_string),
            texts: texts.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Runs with `stdin` as standard input, returning the status and printed output.
    fn run_with(args: Args, stdin: &str) -> (Result<bool>, String) {
        let mut out = Vec::new();
        let status = run(args, stdin.as_bytes(), &mut out);
        (status, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_text_arguments() {
        let (status, out) = run_with(args(&["abc", ""], None), "ignored");
        assert!(status.unwrap());
        assert_eq!(
            out,
            "900150983cd24fb0d6963f7d28e17f72  abc\n\
             d41d8cd98f00b204e9800998ecf8427e  \n"
        );
    }

    #[test]
    fn test_upper_switch() {
        let mut upper = args(&["abc"], None);
        upper.upper = true;
        let (status, out) = run_with(upper, "");
        assert!(status.unwrap());
        assert_eq!(out, "900150983CD24FB0D6963F7D28E17F72  abc\n");
    }

    #[test]
    fn test_file_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all("日本語".as_bytes()).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let mut with_file = args(&[], None);
        with_file.file.push(path.clone());
        let (status, out) = run_with(with_file, "");
        assert!(status.unwrap());
        assert_eq!(out, format!("00110af8b4393ef3f72c50be5b332bec  {}\n", path));
    }

    #[test]
    fn test_stdin_when_no_inputs() {
        let (status, out) = run_with(args(&[], None), "Hello World!");
        assert!(status.unwrap());
        assert_eq!(out, "ed076287532e86365e841e92bfc50d8c  -\n");
    }

    #[test]
    fn test_check_ok_and_failed() {
        let (status, out) = run_with(
            args(&["abc"], Some("900150983CD24FB0D6963F7D28E17F72")),
            "",
        );
        assert!(status.unwrap());
        assert_eq!(out, "abc: OK\n");

        let (status, out) = run_with(
            args(&["abd"], Some("900150983cd24fb0d6963f7d28e17f72")),
            "",
        );
        assert!(!status.unwrap());
        assert_eq!(out, "abd: FAILED\n");

        let (status, out) = run_with(
            args(&[], Some("900150983cd24fb0d6963f7d28e17f72\n")),
            "abc",
        );
        assert!(status.unwrap());
        assert_eq!(out, "-: OK\n");
    }

    #[test]
    fn test_check_needs_single_input() {
        let (status, out) = run_with(
            args(&["a", "b"], Some("900150983cd24fb0d6963f7d28e17f72")),
            "",
        );
        assert!(!status.unwrap());
        assert!(out.is_empty());
    }

    #[test]
    fn test_errors() {
        let (status, _) = run_with(args(&["abc"], Some("1234")), "");
        assert!(matches!(status, Err(Error::InvalidDigest(_))));

        let mut missing = args(&[], None);
        missing.file.push("/nonexistent/md5text/input".to_string());
        let (status, out) = run_with(missing, "");
        assert!(matches!(status, Err(Error::Io(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Input::Text("abc".into()).label(), "abc");
        assert_eq!(Input::File("a.txt".into()).label(), "a.txt");
        assert_eq!(Input::Stdin.label(), "-");
    }
}
