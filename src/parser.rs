//! Input formats: ICCMA-23 `p af` (`i23`) and text graph format (`tgf`).
//!
//! Both accept anything implementing [`BufRead`], so the CLI can hand them a
//! file or stdin indifferently. Argument ids seen downstream are always the
//! dense `0..n` space built here; `i23` ids are `1..N` on the wire and are
//! shifted by one at the parser boundary, never inside the model.

use std::io::BufRead;

use log::debug;

use crate::error::InputError;
use crate::model::Af;
use crate::task::Format;

/// Parses an AF out of `reader` in the given `format`.
pub fn parse<R: BufRead>(reader: R, format: Format) -> Result<Af, InputError> {
    let af = match format {
        Format::I23 => parse_i23(reader)?,
        Format::Tgf => parse_tgf(reader)?,
    };
    debug!(
        "parsed {} arguments, {} attacks",
        af.len(),
        af.attacks().len()
    );
    Ok(af)
}

fn parse_i23<R: BufRead>(reader: R) -> Result<Af, InputError> {
    let mut n: Option<usize> = None;
    let mut attacks: Vec<(usize, usize)> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(rest) = line.strip_prefix("p af") {
            let rest = rest.trim();
            let count: usize = rest
                .parse()
                .map_err(|_| InputError::MalformedHeader(line.to_string()))?;
            n = Some(count);
            continue;
        }
        let count = n.ok_or(InputError::MissingHeader)?;
        let mut parts = line.split_whitespace();
        let (Some(i), Some(j), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(InputError::MalformedAttack(line.to_string()));
        };
        let i: usize = i.parse()?;
        let j: usize = j.parse()?;
        if i == 0 || i > count || j == 0 || j > count {
            return Err(InputError::ArgumentOutOfRange(i.max(j), count));
        }
        attacks.push((i - 1, j - 1));
    }

    let count = n.ok_or(InputError::MissingHeader)?;
    let names: Vec<String> = (1..=count).map(|i| i.to_string()).collect();
    Ok(Af::new(names, attacks))
}

fn parse_tgf<R: BufRead>(reader: R) -> Result<Af, InputError> {
    let mut names: Vec<String> = Vec::new();
    let mut lookup: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    let mut in_attacks = false;
    let mut attacks: Vec<(usize, usize)> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "#" {
            in_attacks = true;
            continue;
        }
        if !in_attacks {
            if lookup.contains_key(line) {
                // duplicate argument name: keep the first id, idempotent.
                continue;
            }
            lookup.insert(line.to_string(), names.len());
            names.push(line.to_string());
        } else {
            let mut parts = line.split_whitespace();
            let (Some(a), Some(b), None) = (parts.next(), parts.next(), parts.next()) else {
                return Err(InputError::MalformedAttack(line.to_string()));
            };
            let i = *lookup
                .get(a)
                .ok_or_else(|| InputError::UnknownArgument(a.to_string()))?;
            let j = *lookup
                .get(b)
                .ok_or_else(|| InputError::UnknownArgument(b.to_string()))?;
            attacks.push((i, j));
        }
    }

    if !in_attacks {
        return Err(InputError::MissingSeparator);
    }

    Ok(Af::new(names, attacks))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i23_two_cycle() {
        let input = "p af 2\n1 2\n2 1\n";
        let af = parse(input.as_bytes(), Format::I23).unwrap();
        assert_eq!(af.len(), 2);
        assert_eq!(af.attacks(), &[(0, 1), (1, 0)]);
        assert_eq!(af.name(0), "1");
    }

    #[test]
    fn i23_ignores_comments_and_blank_lines() {
        let input = "# a comment\np af 1\n\n# another\n";
        let af = parse(input.as_bytes(), Format::I23).unwrap();
        assert_eq!(af.len(), 1);
        assert!(af.attacks().is_empty());
    }

    #[test]
    fn i23_missing_header_is_an_error() {
        let input = "1 2\n";
        assert!(matches!(
            parse(input.as_bytes(), Format::I23),
            Err(InputError::MissingHeader)
        ));
    }

    #[test]
    fn i23_out_of_range_id_is_an_error() {
        let input = "p af 2\n1 3\n";
        assert!(matches!(
            parse(input.as_bytes(), Format::I23),
            Err(InputError::ArgumentOutOfRange(3, 2))
        ));
    }

    #[test]
    fn tgf_names_are_interned_in_first_seen_order() {
        let input = "a\nb\nc\n#\na b\nc b\n";
        let af = parse(input.as_bytes(), Format::Tgf).unwrap();
        assert_eq!(af.id_of("a"), Some(0));
        assert_eq!(af.id_of("b"), Some(1));
        assert_eq!(af.id_of("c"), Some(2));
        assert_eq!(af.attacks(), &[(0, 1), (2, 1)]);
    }

    #[test]
    fn tgf_missing_separator_is_an_error() {
        let input = "a\nb\n";
        assert!(matches!(
            parse(input.as_bytes(), Format::Tgf),
            Err(InputError::MissingSeparator)
        ));
    }

    #[test]
    fn tgf_unknown_attack_name_is_an_error() {
        let input = "a\nb\n#\na c\n";
        assert!(matches!(
            parse(input.as_bytes(), Format::Tgf),
            Err(InputError::UnknownArgument(_))
        ));
    }
}
