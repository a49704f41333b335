use super::{INVALID_CHOICE, MAX_BELOW_MIN, number, required};
use crate::error::{CoreError, FieldErrors};
use crate::model::{EntityId, Gender, NewSegment, Segment, SegmentPatch};

/// Segment create / edit input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentForm {
    pub name: String,
    pub campaign_id: String,
    pub group_name: String,
    /// `m`, `f` or `any` (aliases accepted).
    pub gender: String,
    pub min_age: String,
    pub max_age: String,
}

impl SegmentForm {
    pub fn from_segment(segment: &Segment) -> Self {
        let num = |v: Option<f64>| v.map(|n| n.to_string()).unwrap_or_default();
        Self {
            name: segment.name.clone().unwrap_or_default(),
            campaign_id: segment
                .campaign_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            group_name: segment.group_name.clone().unwrap_or_default(),
            gender: segment
                .gender
                .as_ref()
                .map(|g| g.as_str().to_owned())
                .unwrap_or_default(),
            min_age: num(segment.min_age),
            max_age: num(segment.max_age),
        }
    }

    /// All fields required; gender one of `m` / `f` / `any`; ages numeric
    /// with `min_age <= max_age`. The ordering check only runs once both
    /// ages parse.
    pub fn validate(&self) -> Result<NewSegment, CoreError> {
        let mut errors = FieldErrors::new();
        let name = required(&mut errors, "name", &self.name);
        let campaign_id = required(&mut errors, "campaign_id", &self.campaign_id);
        let group_name = required(&mut errors, "group_name", &self.group_name);
        let gender = Gender::from(required(&mut errors, "gender", &self.gender));
        if matches!(&gender, Gender::Other(raw) if !raw.is_empty()) {
            errors.add("gender", INVALID_CHOICE);
        }
        let min_age = number(&mut errors, "min_age", &self.min_age);
        let max_age = number(&mut errors, "max_age", &self.max_age);

        if matches!((min_age, max_age), (Some(min), Some(max)) if min > max) {
            errors.add("max_age", MAX_BELOW_MIN);
        }

        match (min_age, max_age) {
            (Some(min_age), Some(max_age)) if errors.is_empty() => Ok(NewSegment {
                name,
                campaign_id: EntityId::from(campaign_id.as_str()),
                group_name,
                gender,
                min_age,
                max_age,
            }),
            _ => Err(CoreError::ValidationFailed { errors }),
        }
    }

    /// Validated full-record patch for an edit.
    pub fn validate_patch(&self) -> Result<SegmentPatch, CoreError> {
        self.validate().map(SegmentPatch::from)
    }
}
