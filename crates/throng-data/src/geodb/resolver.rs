// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Resolves option slots into concrete geometry for one agent.

use super::{GeoDb, Optioned, OptionedEntry};
use throng_core::description::{Geometry, GeometryOption, VariableSource};
use throng_core::error::{CrowdError, CrowdResult};

/// Maps a variable value onto a candidate index.
///
/// The value is rounded half away from zero, then clamped to
/// `[0, len - 1]`: some option slots are driven by variables whose range is
/// wider than the number of candidates. Returns `None` when there are no
/// candidates at all.
///
/// # Examples
///
/// ```
/// use throng_data::geodb::option_index;
/// assert_eq!(option_index(1.5, 3), Some(2));
/// assert_eq!(option_index(-4.0, 3), Some(0));
/// assert_eq!(option_index(40.0, 3), Some(2));
/// assert_eq!(option_index(0.0, 0), None);
/// ```
pub fn option_index(value: f32, len: usize) -> Option<usize> {
    let last = len.checked_sub(1)?;
    let rounded = value.round();
    if rounded.is_nan() || rounded <= 0.0 {
        return Some(0);
    }
    if rounded >= last as f32 {
        return Some(last);
    }
    Some(rounded as usize)
}

/// A single-pass iterator over the geometry an agent is made of.
///
/// Created by [`GeoDb::resolve`]. Each option slot is resolved with the
/// agent's current variable values; direct geometries pass through.
pub struct GeometryIter<'a, V: VariableSource + ?Sized> {
    db: &'a GeoDb,
    vars: &'a V,
    entries: std::slice::Iter<'a, OptionedEntry>,
}

impl<'a, V: VariableSource + ?Sized> GeometryIter<'a, V> {
    pub(super) fn new(db: &'a GeoDb, vars: &'a V) -> Self {
        Self {
            db,
            vars,
            entries: db.optioned.iter(),
        }
    }

    fn select(&self, option: &'a GeometryOption) -> CrowdResult<&'a Geometry> {
        let value = self.vars.variable_value(&option.var);
        let index = option_index(value, option.inputs.len()).ok_or_else(|| {
            CrowdError::ModelIntegrity(format!(
                "option '{}' has no candidate geometry",
                option.name
            ))
        })?;
        if index as f32 != value.round() {
            log::debug!(
                "Option '{}': value {value} of '{}' clamped to candidate {index}",
                option.name,
                option.var
            );
        }

        let id = option.inputs.get(index).ok_or_else(|| CrowdError::Bounds {
            context: format!("option '{}'", option.name),
            index: index as i64,
            len: option.inputs.len(),
        })?;
        self.geometry(*id, &option.name)
    }

    fn geometry(&self, id: u32, entry: &str) -> CrowdResult<&'a Geometry> {
        self.db.geometry_by_id(id).ok_or_else(|| {
            CrowdError::ModelIntegrity(format!(
                "entry '{entry}' refers to unregistered geometry id {id}"
            ))
        })
    }
}

impl<'a, V: VariableSource + ?Sized> Iterator for GeometryIter<'a, V> {
    type Item = CrowdResult<&'a Geometry>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.next()?;
        Some(match &entry.item {
            Optioned::Geometry(id) => self.geometry(*id, &entry.name),
            Optioned::Option(option) => self.select(option),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodb::GeoDbBuilder;
    use std::collections::HashMap;
    use throng_core::description::Geometry;

    struct Vars(HashMap<&'static str, f32>);

    impl VariableSource for Vars {
        fn variable_value(&self, name: &str) -> f32 {
            self.0.get(name).copied().unwrap_or(0.0)
        }
    }

    fn db() -> GeoDb {
        let mut builder = GeoDbBuilder::new();
        builder
            .add_geometry(Geometry::new("body", "body.obj", 0))
            .add_geometry(Geometry::new("hat_a", "hat_a.obj", 1))
            .add_geometry(Geometry::new("hat_b", "hat_b.obj", 2))
            .add_geometry(Geometry::new("hat_c", "hat_c.obj", 3));
        builder
            .add_option(GeometryOption::new("hat", "hat_var", vec![1, 2, 3]))
            .unwrap();
        builder.finish()
    }

    fn resolve(db: &GeoDb, value: f32) -> Vec<String> {
        let vars = Vars(HashMap::from([("hat_var", value)]));
        db.resolve(&vars)
            .map(|g| g.map(|g| g.name.clone()))
            .collect::<CrowdResult<_>>()
            .unwrap()
    }

    #[test]
    fn test_option_selects_candidate_by_value() {
        let db = db();
        assert_eq!(resolve(&db, 0.0), vec!["body", "hat_a"]);
        assert_eq!(resolve(&db, 1.0), vec!["body", "hat_b"]);
        assert_eq!(resolve(&db, 2.0), vec!["body", "hat_c"]);
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        let db = db();
        assert_eq!(resolve(&db, 0.49), vec!["body", "hat_a"]);
        assert_eq!(resolve(&db, 0.5), vec!["body", "hat_b"]);
        assert_eq!(resolve(&db, 1.5), vec!["body", "hat_c"]);
        assert_eq!(resolve(&db, -0.5), vec!["body", "hat_a"]);
    }

    #[test]
    fn test_values_far_out_of_range_are_clamped() {
        let db = db();
        assert_eq!(resolve(&db, 1.0e9), vec!["body", "hat_c"]);
        assert_eq!(resolve(&db, -1.0e9), vec!["body", "hat_a"]);
        assert_eq!(resolve(&db, f32::NAN), vec!["body", "hat_a"]);
    }

    #[test]
    fn test_every_value_yields_the_clamped_candidate() {
        let db = db();
        for v in -5..10 {
            let expected = ["hat_a", "hat_b", "hat_c"][v.clamp(0, 2) as usize];
            assert_eq!(resolve(&db, v as f32)[1], expected);
        }
    }

    #[test]
    fn test_empty_option_is_an_integrity_error() {
        let mut builder = GeoDbBuilder::new();
        builder
            .add_option(GeometryOption::new("nothing", "v", vec![]))
            .unwrap();
        let db = builder.finish();
        let vars = Vars(HashMap::new());

        let results: Vec<_> = db.resolve(&vars).collect();
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(CrowdError::ModelIntegrity(_))));
    }
}
