use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::Record;
use crate::error::{GraphError, GraphResult};

/// Inputs handed to a color function for one segment, cell, wedge or line.
#[derive(Debug, Clone, Copy)]
pub struct ColorContext<'a> {
    pub value: f64,
    pub series_index: usize,
    pub record: Option<&'a Record>,
    pub key: &'a str,
}

type ColorCallback = dyn Fn(&ColorContext<'_>) -> String + Send + Sync;

/// Runtime color callback. Equality is identity of the closure.
#[derive(Clone)]
pub struct ColorFn(Arc<ColorCallback>);

impl ColorFn {
    pub fn new(f: impl Fn(&ColorContext<'_>) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    #[must_use]
    pub fn call(&self, ctx: &ColorContext<'_>) -> String {
        (self.0)(ctx)
    }
}

impl fmt::Debug for ColorFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ColorFn(..)")
    }
}

impl PartialEq for ColorFn {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// The `colors` option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// `"<size>-<name>[-reverse]"`, e.g. `"8-Dark2-reverse"`.
    Named(String),
    /// Explicit colors, cycled by series index.
    List(Vec<String>),
    #[serde(skip)]
    Custom(ColorFn),
}

const SET3: [&str; 12] = [
    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462", "#b3de69", "#fccde5",
    "#d9d9d9", "#bc80bd", "#ccebc5", "#ffed6f",
];
const SET1: [&str; 9] = [
    "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628", "#f781bf",
    "#999999",
];
const SET2: [&str; 8] = [
    "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f", "#e5c494", "#b3b3b3",
];
const PASTEL1: [&str; 9] = [
    "#fbb4ae", "#b3cde3", "#ccebc5", "#decbe4", "#fed9a6", "#ffffcc", "#e5d8bd", "#fddaec",
    "#f2f2f2",
];
const PASTEL2: [&str; 8] = [
    "#b3e2cd", "#fdcdac", "#cbd5e8", "#f4cae4", "#e6f5c9", "#fff2ae", "#f1e2cc", "#cccccc",
];
const DARK2: [&str; 8] = [
    "#1b9e77", "#d95f02", "#7570b3", "#e7298a", "#66a61e", "#e6ab02", "#a6761d", "#666666",
];
const ACCENT: [&str; 8] = [
    "#7fc97f", "#beaed4", "#fdc086", "#ffff99", "#386cb0", "#f0027f", "#bf5b17", "#666666",
];
const PAIRED: [&str; 12] = [
    "#a6cee3", "#1f78b4", "#b2df8a", "#33a02c", "#fb9a99", "#e31a1c", "#fdbf6f", "#ff7f00",
    "#cab2d6", "#6a3d9a", "#ffff99", "#b15928",
];

// Qualitative schemes: the k-color variant is the first k entries.
fn scheme(name: &str) -> Option<&'static [&'static str]> {
    match name {
        "Set3" => Some(&SET3),
        "Set1" => Some(&SET1),
        "Set2" => Some(&SET2),
        "Pastel1" => Some(&PASTEL1),
        "Pastel2" => Some(&PASTEL2),
        "Dark2" => Some(&DARK2),
        "Accent" => Some(&ACCENT),
        "Paired" => Some(&PAIRED),
        _ => None,
    }
}

/// Resolves a `"<size>-<name>[-reverse]"` palette name.
pub fn named_palette(spec: &str) -> GraphResult<Vec<String>> {
    let invalid = |reason: String| GraphError::InvalidColorSpec {
        spec: spec.to_owned(),
        reason,
    };

    let mut parts = spec.split('-');
    let size = parts
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(|| invalid("expected a numeric palette size".to_owned()))?;
    let name = parts
        .next()
        .ok_or_else(|| invalid("expected a palette name".to_owned()))?;
    let reverse = match parts.next() {
        None => false,
        Some("reverse") => true,
        Some(other) => return Err(invalid(format!("unexpected suffix `{other}`"))),
    };
    if parts.next().is_some() {
        return Err(invalid("too many `-` separated parts".to_owned()));
    }

    let colors = scheme(name).ok_or_else(|| invalid(format!("unknown palette `{name}`")))?;
    if !(3..=colors.len()).contains(&size) {
        return Err(invalid(format!(
            "palette `{name}` provides 3..={} colors, {size} requested",
            colors.len()
        )));
    }

    let mut palette: Vec<String> = colors[..size].iter().map(|c| (*c).to_owned()).collect();
    if reverse {
        palette.reverse();
    }
    Ok(palette)
}

/// Color function built once per render cycle from the `colors` option.
#[derive(Debug, Clone)]
pub enum ColorResolver {
    Palette(Vec<String>),
    Custom(ColorFn),
}

impl ColorResolver {
    /// Builds the resolver; `None` falls back to the 12-color `Set3` palette.
    pub fn new(spec: Option<&ColorSpec>) -> GraphResult<Self> {
        match spec {
            None => Ok(Self::Palette(SET3.iter().map(|c| (*c).to_owned()).collect())),
            Some(ColorSpec::Named(name)) => Ok(Self::Palette(named_palette(name)?)),
            Some(ColorSpec::List(colors)) => {
                if colors.is_empty() {
                    return Err(GraphError::InvalidColorSpec {
                        spec: "[]".to_owned(),
                        reason: "color list must not be empty".to_owned(),
                    });
                }
                Ok(Self::Palette(colors.clone()))
            }
            Some(ColorSpec::Custom(f)) => Ok(Self::Custom(f.clone())),
        }
    }

    #[must_use]
    pub fn resolve(&self, ctx: &ColorContext<'_>) -> String {
        match self {
            Self::Palette(colors) => colors[ctx.series_index % colors.len()].clone(),
            Self::Custom(f) => f.call(ctx),
        }
    }
}
