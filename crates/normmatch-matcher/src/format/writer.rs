//! Prototype table writer. Tables only hold prototypes that pass the
//! reader's checks, so written output loads back unchanged.

use std::io::{self, Write};

use normmatch_core::types::{ParamDesc, Prototype, PrototypeStyle};

use crate::table::PrototypeTable;

/// Write `table` in the text format read by [`crate::loader::parse_table`].
///
/// Classes are written in id order. Fails with `InvalidInput` for a class
/// whose character would read back as whitespace.
pub fn write_table<W: Write>(w: &mut W, table: &PrototypeTable) -> io::Result<()> {
    writeln!(w, "{}", table.num_params())?;
    for desc in table.param_desc() {
        write_param_desc(w, desc)?;
    }
    for class in table.classes() {
        let ch = class.as_char();
        if ch.is_ascii_whitespace() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("class id {} cannot be written as a class character", class.value()),
            ));
        }
        let protos = table.prototypes(class);
        writeln!(w, "{} {}", ch, protos.len())?;
        for proto in protos {
            write_prototype(w, proto)?;
        }
    }
    Ok(())
}

/// Render `table` to a string.
pub fn table_to_string(table: &PrototypeTable) -> io::Result<String> {
    let mut buf = Vec::new();
    write_table(&mut buf, table)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

pub fn write_param_desc<W: Write>(w: &mut W, desc: &ParamDesc) -> io::Result<()> {
    writeln!(
        w,
        "{} {} {} {}",
        if desc.circular { "circular" } else { "linear" },
        if desc.non_essential { "nonEssential" } else { "essential" },
        desc.min,
        desc.max
    )
}

pub fn write_prototype<W: Write>(w: &mut W, proto: &Prototype) -> io::Result<()> {
    writeln!(
        w,
        "{} {} {}",
        if proto.significant { "significant" } else { "insignificant" },
        proto.style.keyword(),
        proto.num_samples
    )?;
    write_floats(w, &proto.mean)?;
    match proto.style {
        PrototypeStyle::Spherical => write_floats(w, &proto.variance[..1.min(proto.variance.len())]),
        PrototypeStyle::Elliptical | PrototypeStyle::Automatic => write_floats(w, &proto.variance),
        PrototypeStyle::Mixed => {
            let keywords: Vec<&str> = match &proto.distributions {
                Some(d) if d.len() == proto.num_params() => d.iter().map(|d| d.keyword()).collect(),
                _ => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        "mixed prototype needs one distribution per parameter",
                    ))
                }
            };
            writeln!(w, "{}", keywords.join(" "))?;
            write_floats(w, &proto.variance)
        }
    }
}

fn write_floats<W: Write>(w: &mut W, values: &[f64]) -> io::Result<()> {
    let text: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    writeln!(w, " {}", text.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use normmatch_core::types::{ClassId, Distribution};

    #[test]
    fn test_writes_expected_layout() {
        let mut table = PrototypeTable::new(vec![ParamDesc::new(true, false, 0.0, 1.0)]).unwrap();
        table
            .push(ClassId::new(b'a'), Prototype::spherical(vec![0.5], 0.25))
            .unwrap();
        let text = table_to_string(&table).unwrap();
        assert_eq!(
            text,
            "1\ncircular nonEssential 0 1\na 1\nsignificant spherical 1\n 0.5\n 0.25\n"
        );
    }

    #[test]
    fn test_writes_mixed_distributions() {
        let proto = Prototype::new(
            false,
            PrototypeStyle::Mixed,
            7,
            vec![1.0, 2.0],
            vec![0.5, 4.0],
            Some(vec![Distribution::Random, Distribution::Normal]),
        );
        let mut buf = Vec::new();
        write_prototype(&mut buf, &proto).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "insignificant mixed 7\n 1 2\nrandom normal\n 0.5 4\n"
        );
    }

    #[test]
    fn test_mixed_without_distributions_rejected() {
        let proto = Prototype::new(true, PrototypeStyle::Mixed, 1, vec![0.0, 0.0], vec![1.0, 1.0], None);
        let mut buf = Vec::new();
        let err = write_prototype(&mut buf, &proto).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_whitespace_class_rejected() {
        let mut table = PrototypeTable::new(vec![ParamDesc::linear(0.0, 1.0)]).unwrap();
        table
            .push(ClassId::new(b' '), Prototype::spherical(vec![0.0], 1.0))
            .unwrap();
        let err = table_to_string(&table).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
