use std::collections::HashMap;

use strum::{Display, EnumIter, EnumString};

use super::ViewState;
use super::filter::Searchable;
use super::sort::{SortDir, SortValue, Sortable};
use crate::model::{EntityId, Gender, Segment};

/// Campaign id -> name, used to display and search segment references.
pub type CampaignNames = HashMap<EntityId, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum SegmentField {
    Name,
    GroupName,
    Gender,
    CampaignName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum SegmentSortKey {
    Id,
    Name,
    CampaignName,
    GroupName,
    Gender,
    Age,
    UpdatedAt,
    CreatedAt,
}

impl Segment {
    /// Name of the referenced campaign, if it is known.
    pub fn campaign_name<'a>(&self, names: &'a CampaignNames) -> Option<&'a str> {
        self.campaign_id
            .as_ref()
            .and_then(|id| names.get(id))
            .map(String::as_str)
    }
}

impl Searchable for Segment {
    type Field = SegmentField;
    type Context = CampaignNames;

    const ALL_FIELDS: &'static [SegmentField] = &[
        SegmentField::Name,
        SegmentField::GroupName,
        SegmentField::Gender,
        SegmentField::CampaignName,
    ];

    fn field_text(&self, field: SegmentField, names: &CampaignNames) -> Option<String> {
        match field {
            SegmentField::Name => self.name.clone(),
            SegmentField::GroupName => self.group_name.clone(),
            // Both the wire code and the label are searchable ("f", "mujer").
            SegmentField::Gender => self.gender.as_ref().map(|g| format!("{} {}", g.as_str(), g.label())),
            SegmentField::CampaignName => self.campaign_name(names).map(str::to_owned),
        }
    }
}

impl Sortable for Segment {
    type Key = SegmentSortKey;
    type Context = CampaignNames;

    fn sort_values(&self, key: SegmentSortKey, names: &CampaignNames) -> Vec<SortValue> {
        match key {
            SegmentSortKey::Id => vec![SortValue::number(self.id.as_number())],
            SegmentSortKey::Name => vec![SortValue::text(self.name.as_deref())],
            SegmentSortKey::CampaignName => vec![SortValue::text(self.campaign_name(names))],
            SegmentSortKey::GroupName => vec![SortValue::text(self.group_name.as_deref())],
            SegmentSortKey::Gender => vec![SortValue::text(self.gender.as_ref().map(Gender::as_str))],
            SegmentSortKey::Age => vec![SortValue::number(self.min_age), SortValue::number(self.max_age)],
            SegmentSortKey::UpdatedAt => vec![SortValue::timestamp(self.updated_at.as_ref())],
            SegmentSortKey::CreatedAt => vec![SortValue::timestamp(self.created_at.as_ref())],
        }
    }
}

impl ViewState<SegmentField, SegmentSortKey> {
    /// Default segment listing: oldest first.
    pub fn segments(page_size: usize) -> Self {
        Self::new(page_size).with_sort(SegmentSortKey::CreatedAt, SortDir::Asc)
    }
}
