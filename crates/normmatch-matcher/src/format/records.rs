//! Cluster prototype record grammar.
//!
//! ```text
//! sample size:  <n>
//! descriptor:   circular|linear essential|nonEssential <min> <max>
//! prototype:    significant|insignificant <style> <samples>
//!               <mean × n>
//!               spherical:            <variance>
//!               elliptical|automatic: <variance × n>
//!               mixed:                <normal|uniform|random × n> <variance × n>
//! ```

use normmatch_core::constants::MAX_NUM_PARAMS;
use normmatch_core::errors::FormatError;
use normmatch_core::types::{Distribution, ParamDesc, Prototype, PrototypeStyle};

use super::scanner::Scanner;

const CIRCULARITY: [&str; 2] = ["circular", "linear"];
const ESSENTIALITY: [&str; 2] = ["essential", "nonEssential"];
const SIGNIFICANCE: [&str; 2] = ["significant", "insignificant"];
const STYLES: [&str; 4] = ["spherical", "elliptical", "mixed", "automatic"];
const DISTRIBUTIONS: [&str; 3] = ["normal", "uniform", "random"];

/// Read the number of parameters per sample.
pub fn read_sample_size(scanner: &mut Scanner<'_>) -> Result<usize, FormatError> {
    let (n, line) = scanner.expect_parsed::<i64>("positive sample size")?;
    usize::try_from(n)
        .ok()
        .filter(|n| (1..=MAX_NUM_PARAMS).contains(n))
        .ok_or(FormatError::InvalidSampleSize {
            line,
            value: n,
            max: MAX_NUM_PARAMS,
        })
}

/// Read `n` parameter descriptors.
pub fn read_param_desc(scanner: &mut Scanner<'_>, n: usize) -> Result<Vec<ParamDesc>, FormatError> {
    let mut descs = Vec::with_capacity(n);
    for index in 0..n {
        let (circularity, line) = scanner.expect_keyword(&CIRCULARITY)?;
        let (essentiality, _) = scanner.expect_keyword(&ESSENTIALITY)?;
        let (min, _) = scanner.expect_parsed::<f64>("parameter min")?;
        let (max, _) = scanner.expect_parsed::<f64>("parameter max")?;
        if min.is_nan() || max.is_nan() || min > max {
            return Err(FormatError::InvalidParamRange {
                line,
                index,
                min,
                max,
            });
        }
        descs.push(ParamDesc::new(circularity == 0, essentiality == 0, min, max));
    }
    Ok(descs)
}

/// Read one prototype record with `n` dimensions.
pub fn read_prototype(scanner: &mut Scanner<'_>, n: usize) -> Result<Prototype, FormatError> {
    let (significance, _) = scanner.expect_keyword(&SIGNIFICANCE)?;
    let (style_index, _) = scanner.expect_keyword(&STYLES)?;
    let style = match style_index {
        0 => PrototypeStyle::Spherical,
        1 => PrototypeStyle::Elliptical,
        2 => PrototypeStyle::Mixed,
        _ => PrototypeStyle::Automatic,
    };
    let (num_samples, _) = scanner.expect_parsed::<u32>("sample count")?;
    let mean = scanner.expect_floats(n, "prototype mean")?;

    let (variance, distributions) = match style {
        PrototypeStyle::Spherical => {
            let line = scanner.next_line();
            let v = scanner.expect_floats(1, "spherical variance")?;
            check_variances(&v, line)?;
            (vec![v[0]; n], None)
        }
        PrototypeStyle::Elliptical | PrototypeStyle::Automatic => {
            let line = scanner.next_line();
            let v = scanner.expect_floats(n, "elliptical variance")?;
            check_variances(&v, line)?;
            (v, None)
        }
        PrototypeStyle::Mixed => {
            let distributions = read_distributions(scanner, n)?;
            let line = scanner.next_line();
            let v = scanner.expect_floats(n, "mixed variance")?;
            check_variances(&v, line)?;
            (v, Some(distributions))
        }
    };

    Ok(Prototype::new(
        significance == 0,
        style,
        num_samples,
        mean,
        variance,
        distributions,
    ))
}

fn read_distributions(scanner: &mut Scanner<'_>, n: usize) -> Result<Vec<Distribution>, FormatError> {
    (0..n)
        .map(|_| {
            scanner.expect_keyword(&DISTRIBUTIONS).map(|(i, _)| match i {
                0 => Distribution::Normal,
                1 => Distribution::Uniform,
                _ => Distribution::Random,
            })
        })
        .collect()
}

fn check_variances(variances: &[f64], line: usize) -> Result<(), FormatError> {
    match variances
        .iter()
        .enumerate()
        .find(|(_, v)| !Prototype::is_valid_variance(**v))
    {
        Some((index, &value)) => Err(FormatError::InvalidVariance { line, index, value }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_size_bounds() {
        assert_eq!(read_sample_size(&mut Scanner::new("4")).unwrap(), 4);
        assert!(matches!(
            read_sample_size(&mut Scanner::new("0")),
            Err(FormatError::InvalidSampleSize { value: 0, .. })
        ));
        assert!(matches!(
            read_sample_size(&mut Scanner::new("-3")),
            Err(FormatError::InvalidSampleSize { value: -3, .. })
        ));
        assert!(matches!(
            read_sample_size(&mut Scanner::new("70000")),
            Err(FormatError::InvalidSampleSize { .. })
        ));
    }

    #[test]
    fn test_param_desc() {
        let mut s = Scanner::new("circular nonEssential 0 1\nlinear essential -0.5 0.5\n");
        let descs = read_param_desc(&mut s, 2).unwrap();
        assert!(descs[0].circular);
        assert!(descs[0].non_essential);
        assert!(!descs[1].circular);
        assert!(descs[1].is_essential());
        assert_eq!(descs[1].range, 1.0);
    }

    #[test]
    fn test_param_desc_inverted_range() {
        let mut s = Scanner::new("linear essential 0.5\n 0\n");
        assert!(matches!(
            read_param_desc(&mut s, 1),
            Err(FormatError::InvalidParamRange { index: 0, line: 1, .. })
        ));
    }

    #[test]
    fn test_spherical_prototype() {
        let mut s = Scanner::new("significant spherical 12\n1 2 3\n4\n");
        let p = read_prototype(&mut s, 3).unwrap();
        assert!(p.significant);
        assert_eq!(p.style, PrototypeStyle::Spherical);
        assert_eq!(p.num_samples, 12);
        assert_eq!(p.mean, vec![1.0, 2.0, 3.0]);
        assert_eq!(p.variance, vec![4.0; 3]);
        assert_eq!(p.weight, vec![0.25; 3]);
    }

    #[test]
    fn test_mixed_prototype() {
        let mut s = Scanner::new(
            "insignificant mixed 5\n0 0\nnormal uniform\n2 0.5\n",
        );
        let p = read_prototype(&mut s, 2).unwrap();
        assert!(!p.significant);
        assert_eq!(
            p.distributions,
            Some(vec![Distribution::Normal, Distribution::Uniform])
        );
        assert_eq!(p.weight, vec![0.5, 2.0]);
    }

    #[test]
    fn test_zero_variance_rejected() {
        let mut s = Scanner::new("significant elliptical 3\n0 0\n1 0\n");
        assert!(matches!(
            read_prototype(&mut s, 2),
            Err(FormatError::InvalidVariance { index: 1, line: 3, .. })
        ));
    }

    #[test]
    fn test_truncated_prototype() {
        let mut s = Scanner::new("significant elliptical 3\n0 0\n1\n");
        assert!(matches!(
            read_prototype(&mut s, 2),
            Err(FormatError::UnexpectedEof { .. })
        ));
    }
}
