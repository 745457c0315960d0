//! Interactive player prompts.
//!
//! Generic over `BufRead`/`Write` so the binary can drive them from stdin and
//! tests from an in-memory buffer.

use std::io::{self, BufRead, Write};

use crate::models::{PlayerQuery, PlayerSlot, Region, RiotId};

/// Ask for one player's game name, tag line, and region.
///
/// Empty answers and unknown regions re-prompt. End of input is an
/// `UnexpectedEof` error.
pub fn prompt_player<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    slot: PlayerSlot,
) -> io::Result<PlayerQuery> {
    writeln!(output, "\n--- {} Information ---", slot)?;
    print_regions(output)?;

    let riot_id = prompt_riot_id(input, output, slot)?;
    let region = prompt_region(input, output, slot)?;
    Ok(PlayerQuery::new(riot_id, region))
}

/// Ask for a game name and tag line until both are usable.
pub fn prompt_riot_id<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    slot: PlayerSlot,
) -> io::Result<RiotId> {
    loop {
        let name = ask_non_empty(
            input,
            output,
            &format!("Enter the game name for {}: ", slot),
        )?;
        let tag = ask_non_empty(
            input,
            output,
            &format!("Enter the tag line for {} (e.g., NA1): ", slot),
        )?;
        match RiotId::new(name, tag) {
            Ok(id) => return Ok(id),
            Err(e) => writeln!(output, "{}", e)?,
        }
    }
}

/// Ask for a region until a valid one is given.
pub fn prompt_region<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    slot: PlayerSlot,
) -> io::Result<Region> {
    let names: Vec<&str> = Region::ALL.iter().map(|r| r.as_str()).collect();
    let question = format!("Enter the region for {} ({}): ", slot, names.join("/"));

    loop {
        let answer = ask(input, output, &question)?;
        match answer.parse::<Region>() {
            Ok(region) => return Ok(region),
            Err(e) => writeln!(output, "{}", e)?,
        }
    }
}

fn print_regions<W: Write>(output: &mut W) -> io::Result<()> {
    let names: Vec<&str> = Region::ALL.iter().map(|r| r.as_str()).collect();
    writeln!(output, "Valid regions: {}", names.join(", "))?;
    writeln!(output, "Region examples:")?;
    for region in Region::ALL {
        writeln!(output, "  - {}: {}", region, region.examples())?;
    }
    Ok(())
}

fn ask_non_empty<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<String> {
    loop {
        let answer = ask(input, output, question)?;
        if !answer.is_empty() {
            return Ok(answer);
        }
    }
}

/// Print `question` and read one trimmed line.
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<String> {
    write!(output, "{}", question)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before all answers were given",
        ));
    }
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(answers: &str, slot: PlayerSlot) -> (io::Result<PlayerQuery>, String) {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = prompt_player(&mut input, &mut output, slot);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_prompt_player() {
        let (result, out) = run("Faker\nKR1\nasia\n", PlayerSlot::One);
        let query = result.unwrap();

        assert_eq!(query.riot_id.to_string(), "Faker#KR1");
        assert_eq!(query.region, Region::Asia);
        assert!(out.contains("--- Player 1 Information ---"));
        assert!(out.contains("  - sea: Southeast Asia, Oceania"));
        assert!(out.contains("Enter the region for Player 1 (americas/asia/europe/sea): "));
    }

    #[test]
    fn test_region_is_normalized() {
        let (result, _) = run("Alice\n#EUW\n  EUROPE \n", PlayerSlot::Two);
        let query = result.unwrap();

        assert_eq!(query.riot_id.tag_line, "EUW");
        assert_eq!(query.region, Region::Europe);
    }

    #[test]
    fn test_invalid_region_reprompts() {
        let (result, out) = run("Alice\nEUW\nmars\neurope\n", PlayerSlot::Two);

        assert_eq!(result.unwrap().region, Region::Europe);
        assert!(out.contains(
            "Invalid region 'mars'. Please choose from: americas, asia, europe, sea"
        ));
        assert_eq!(out.matches("Enter the region for Player 2").count(), 2);
    }

    #[test]
    fn test_empty_name_reprompts() {
        let (result, out) = run("\n  \nBob\nNA1\namericas\n", PlayerSlot::One);

        assert_eq!(result.unwrap().riot_id.game_name, "Bob");
        assert_eq!(out.matches("Enter the game name for Player 1").count(), 3);
    }

    #[test]
    fn test_bare_hash_tag_reprompts() {
        let (result, out) = run("Bob\n#\nBob\nNA1\namericas\n", PlayerSlot::One);

        assert_eq!(result.unwrap().riot_id.to_string(), "Bob#NA1");
        assert!(out.contains("Tag line must not be empty"));
    }

    #[test]
    fn test_end_of_input_is_error() {
        let (result, _) = run("Bob\n", PlayerSlot::One);
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::UnexpectedEof);
    }
}
