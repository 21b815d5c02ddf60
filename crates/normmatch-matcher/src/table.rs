//! In-memory prototype table.

use normmatch_core::errors::TableError;
use normmatch_core::types::collections::{FxHashMap, SmallVec4};
use normmatch_core::types::{ClassId, ParamDesc, Prototype, PrototypeStyle};

/// Where and why a tolerant load stopped scanning class blocks before the
/// end of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockScanStop {
    pub line: usize,
    pub found: String,
}

/// Summary of how a table was read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Class blocks read, counting repeated classes once per block.
    pub blocks_read: usize,
    /// Set when block scanning ended on an unparsable header.
    pub stopped_early: Option<BlockScanStop>,
}

/// Per-class cluster prototypes sharing one set of parameter descriptors.
///
/// Built once, then shared read-only (typically behind an `Arc`).
/// The noise class never has an entry.
#[derive(Debug, Clone)]
pub struct PrototypeTable {
    param_desc: Vec<ParamDesc>,
    protos: FxHashMap<ClassId, SmallVec4<Prototype>>,
    report: LoadReport,
}

impl PrototypeTable {
    /// Empty table over the given descriptors. Each descriptor needs
    /// `min <= max`.
    pub fn new(param_desc: Vec<ParamDesc>) -> Result<Self, TableError> {
        if param_desc.is_empty() {
            return Err(TableError::NoParams);
        }
        if let Some((index, desc)) = param_desc
            .iter()
            .enumerate()
            .find(|(_, d)| d.min.is_nan() || d.max.is_nan() || d.min > d.max)
        {
            return Err(TableError::InvalidParamRange {
                index,
                min: desc.min,
                max: desc.max,
            });
        }
        Ok(Self {
            param_desc,
            protos: FxHashMap::default(),
            report: LoadReport::default(),
        })
    }

    /// Append a prototype to `class`'s list.
    ///
    /// The prototype must satisfy the same rules as a record read from a
    /// file: one positive finite variance per dimension with matching
    /// weights, a single shared variance when spherical, and a distribution
    /// per dimension exactly when mixed.
    pub fn push(&mut self, class: ClassId, proto: Prototype) -> Result<(), TableError> {
        if class.is_noise() {
            return Err(TableError::ReservedClass);
        }
        validate_prototype(class, &proto, self.num_params())?;
        self.protos.entry(class).or_default().push(proto);
        Ok(())
    }

    /// Table over descriptors already validated by the reader.
    pub(crate) fn from_descriptors(param_desc: Vec<ParamDesc>) -> Self {
        debug_assert!(!param_desc.is_empty());
        Self {
            param_desc,
            protos: FxHashMap::default(),
            report: LoadReport::default(),
        }
    }

    /// Append a record read with this table's width.
    pub(crate) fn push_record(&mut self, class: ClassId, proto: Prototype) {
        debug_assert_eq!(proto.num_params(), self.num_params());
        self.protos.entry(class).or_default().push(proto);
    }

    /// Register `class` without prototypes. Scores for it are the worst rating.
    pub(crate) fn touch(&mut self, class: ClassId) {
        self.protos.entry(class).or_default();
    }

    pub(crate) fn set_report(&mut self, report: LoadReport) {
        self.report = report;
    }

    pub fn num_params(&self) -> usize {
        self.param_desc.len()
    }

    pub fn param_desc(&self) -> &[ParamDesc] {
        &self.param_desc
    }

    /// Prototypes of `class`, in load order. Empty for unknown classes.
    pub fn prototypes(&self, class: ClassId) -> &[Prototype] {
        self.protos
            .get(&class)
            .map(|list| list.as_slice())
            .unwrap_or(&[])
    }

    /// Classes that appeared in the table, sorted by id.
    pub fn classes(&self) -> Vec<ClassId> {
        let mut classes: Vec<ClassId> = self.protos.keys().copied().collect();
        classes.sort_unstable();
        classes
    }

    /// Number of classes with at least one prototype.
    pub fn class_count(&self) -> usize {
        self.protos.values().filter(|l| !l.is_empty()).count()
    }

    pub fn proto_count(&self) -> usize {
        self.protos.values().map(|l| l.len()).sum()
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }
}

fn validate_prototype(class: ClassId, proto: &Prototype, n: usize) -> Result<(), TableError> {
    let class_name = || class.to_string();
    if proto.num_params() != n || proto.variance.len() != n || proto.weight.len() != n {
        return Err(TableError::DimensionMismatch {
            class: class_name(),
            expected: n,
            found: proto.num_params(),
        });
    }
    if let Some((index, &value)) = proto
        .variance
        .iter()
        .enumerate()
        .find(|(_, v)| !Prototype::is_valid_variance(**v))
    {
        return Err(TableError::InvalidVariance {
            class: class_name(),
            index,
            value,
        });
    }
    if proto
        .variance
        .iter()
        .zip(&proto.weight)
        .any(|(v, w)| v.recip() != *w)
    {
        return Err(TableError::WeightMismatch { class: class_name() });
    }

    match (proto.style, &proto.distributions) {
        (PrototypeStyle::Spherical, None) => {
            if proto.variance.iter().any(|v| *v != proto.variance[0]) {
                return Err(TableError::NonUniformVariance { class: class_name() });
            }
        }
        (PrototypeStyle::Mixed, Some(d)) if d.len() == n => {}
        (PrototypeStyle::Mixed, d) => {
            return Err(TableError::MissingDistributions {
                class: class_name(),
                expected: n,
                found: d.as_ref().map_or(0, Vec::len),
            });
        }
        (PrototypeStyle::Elliptical | PrototypeStyle::Automatic, None) => {}
        (style, Some(_)) => {
            return Err(TableError::UnexpectedDistributions {
                class: class_name(),
                style: style.keyword(),
            });
        }
    }
    Ok(())
}
