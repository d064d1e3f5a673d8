//! Interactive settings collection on stdin.
//!
//! Mirrors the flag set one prompt at a time; empty input keeps the
//! value already parsed from the command line, so flags double as the
//! defaults shown in each prompt.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use clap::ValueEnum;

use crate::{CliArgs, GeneratorArg};

/// Ask for every generation setting in turn, overwriting `args` in place.
pub(crate) fn collect(args: &mut CliArgs, input: &mut impl BufRead) -> io::Result<()> {
    println!("Random region creator. Empty input keeps the value in brackets.");
    args.width = prompt_number(input, "Map width in units of 64 cells", args.width)?;
    args.height = prompt_number(input, "Map height in units of 64 cells", args.height)?;
    args.level = prompt_number(input, "Base terrain level", args.level)?;
    args.blur = prompt_number(input, "Blur passes", args.blur)?;
    args.generator = prompt_generator(input, args.generator)?;
    match args.generator {
        GeneratorArg::Noise => {
            args.roughness = prompt_number(input, "Roughness", args.roughness)?;
            args.detail = prompt_number(input, "Detail (octaves)", args.detail)?;
            args.peak = prompt_number(input, "Highest peak", args.peak)?;
            args.bottom = prompt_number(input, "Lowest bottom", args.bottom)?;
            args.water = prompt_number(input, "Water fraction", args.water)?;
        }
        GeneratorArg::Prebuilt | GeneratorArg::Lazy | GeneratorArg::Smooth => {
            args.steepness = prompt_number(input, "Steepness", args.steepness)?;
            args.detail = prompt_number(input, "Detail (recursion depth)", args.detail)?;
        }
    }
    args.seed = prompt_seed(input, args.seed)?;
    Ok(())
}

/// Print a prompt and read back one trimmed line.
fn ask(input: &mut impl BufRead, prompt: &str) -> io::Result<String> {
    print!("{prompt}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Prompt for one numeric setting. Empty or unparsable input keeps the
/// default.
fn prompt_number<T>(input: &mut impl BufRead, name: &str, default: T) -> io::Result<T>
where
    T: FromStr + Display + Copy,
{
    let line = ask(input, &format!("{name} [{default}]"))?;
    if line.is_empty() {
        return Ok(default);
    }
    match line.parse() {
        Ok(value) => Ok(value),
        Err(_) => {
            println!("Could not read that, keeping {default}.");
            Ok(default)
        }
    }
}

fn prompt_generator(input: &mut impl BufRead, default: GeneratorArg) -> io::Result<GeneratorArg> {
    println!("Terrain generators:");
    println!("  noise    - multi-octave lattice noise");
    println!("  prebuilt - fractal grid, tree built up front");
    println!("  lazy     - fractal grid, evaluated per sample");
    println!("  smooth   - fractal grid with curved edges");
    let line = ask(input, &format!("Generator [{}]", variant_name(default)))?;
    if line.is_empty() {
        return Ok(default);
    }
    match GeneratorArg::from_str(&line, true) {
        Ok(arg) => Ok(arg),
        Err(_) => {
            println!("Unknown generator, keeping {}.", variant_name(default));
            Ok(default)
        }
    }
}

fn variant_name(arg: GeneratorArg) -> &'static str {
    match arg {
        GeneratorArg::Noise => "noise",
        GeneratorArg::Prebuilt => "prebuilt",
        GeneratorArg::Lazy => "lazy",
        GeneratorArg::Smooth => "smooth",
    }
}

/// Prompt for the master seed; `r` asks for a fresh clock-derived one.
fn prompt_seed(input: &mut impl BufRead, default: Option<u64>) -> io::Result<Option<u64>> {
    let line = ask(input, "Seed ('r' for a random seed)")?;
    if line.is_empty() {
        return Ok(default);
    }
    if line.eq_ignore_ascii_case("r") {
        return Ok(None);
    }
    match line.parse() {
        Ok(value) => Ok(Some(value)),
        Err(_) => {
            println!("Could not read that, using a random seed.");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Cursor;

    fn default_args() -> CliArgs {
        CliArgs::parse_from(["relief"])
    }

    #[test]
    fn test_empty_lines_keep_every_default() {
        let mut args = default_args();
        let mut input = Cursor::new("\n\n\n\n\n\n\n\n");
        collect(&mut args, &mut input).unwrap();
        assert_eq!(args.width, 4);
        assert_eq!(args.height, 4);
        assert_eq!(args.level, 50);
        assert_eq!(args.blur, 1);
        assert_eq!(args.generator, GeneratorArg::Lazy);
        assert_eq!(args.detail, 6);
        assert_eq!(args.seed, None);
    }

    #[test]
    fn test_grid_generator_prompts_steepness_then_detail() {
        let mut args = default_args();
        let mut input = Cursor::new("2\n3\n70\n0\nsmooth\n0.8\n5\n42\n");
        collect(&mut args, &mut input).unwrap();
        assert_eq!(args.width, 2);
        assert_eq!(args.height, 3);
        assert_eq!(args.level, 70);
        assert_eq!(args.blur, 0);
        assert_eq!(args.generator, GeneratorArg::Smooth);
        assert!((args.steepness - 0.8).abs() < 1e-6);
        assert_eq!(args.detail, 5);
        assert_eq!(args.seed, Some(42));
    }

    #[test]
    fn test_noise_generator_prompts_its_own_settings() {
        let mut args = default_args();
        let mut input = Cursor::new("\n\n\n\nnoise\n0.7\n4\n200\n10\n0.3\n777\n");
        collect(&mut args, &mut input).unwrap();
        assert_eq!(args.generator, GeneratorArg::Noise);
        assert!((args.roughness - 0.7).abs() < 1e-6);
        assert_eq!(args.detail, 4);
        assert_eq!(args.peak, 200);
        assert_eq!(args.bottom, 10);
        assert!((args.water - 0.3).abs() < 1e-6);
        assert_eq!(args.seed, Some(777));
    }

    #[test]
    fn test_r_requests_a_clock_seed() {
        let mut args = default_args();
        args.seed = Some(5);
        let mut input = Cursor::new("\n\n\n\n\n\n\nR\n");
        collect(&mut args, &mut input).unwrap();
        assert_eq!(args.seed, None, "'r' must discard the explicit seed");
    }

    #[test]
    fn test_unparsable_input_keeps_the_default() {
        let mut args = default_args();
        let mut input = Cursor::new("wide\n\n\n\n\n\n\n\n");
        collect(&mut args, &mut input).unwrap();
        assert_eq!(args.width, 4);
    }

    #[test]
    fn test_input_may_run_out_early() {
        let mut args = default_args();
        let mut input = Cursor::new("8\n");
        collect(&mut args, &mut input).unwrap();
        assert_eq!(args.width, 8);
        assert_eq!(args.height, 4, "prompts past the input keep defaults");
        assert_eq!(args.seed, None);
    }
}
