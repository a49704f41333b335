use strum::{Display, EnumIter, EnumString};

use super::ViewState;
use super::filter::Searchable;
use super::paginate::Page;
use super::sort::{SortDir, SortValue, Sortable};
use crate::model::Campaign;

/// Campaign status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CampaignStatus {
    #[default]
    All,
    Active,
    Inactive,
}

impl CampaignStatus {
    pub fn admits(self, campaign: &Campaign) -> bool {
        match self {
            Self::All => true,
            Self::Active => campaign.is_active(),
            Self::Inactive => !campaign.is_active(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum CampaignField {
    Name,
    Description,
    Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum CampaignSortKey {
    Name,
    CreatedAt,
    UpdatedAt,
}

impl Searchable for Campaign {
    type Field = CampaignField;
    type Context = ();

    const ALL_FIELDS: &'static [CampaignField] =
        &[CampaignField::Name, CampaignField::Description, CampaignField::Url];

    fn field_text(&self, field: CampaignField, _: &()) -> Option<String> {
        match field {
            CampaignField::Name => self.name.clone(),
            CampaignField::Description => self.description.clone(),
            CampaignField::Url => self.url.clone(),
        }
    }
}

impl Sortable for Campaign {
    type Key = CampaignSortKey;
    type Context = ();

    fn sort_values(&self, key: CampaignSortKey, _: &()) -> Vec<SortValue> {
        vec![match key {
            CampaignSortKey::Name => SortValue::text(self.name.as_deref()),
            CampaignSortKey::CreatedAt => SortValue::timestamp(self.created_at.as_ref()),
            CampaignSortKey::UpdatedAt => SortValue::timestamp(self.updated_at.as_ref()),
        }]
    }
}

impl ViewState<CampaignField, CampaignSortKey> {
    /// Default campaign listing: newest first.
    pub fn campaigns(page_size: usize) -> Self {
        Self::new(page_size).with_sort(CampaignSortKey::CreatedAt, SortDir::Desc)
    }
}

/// Status filter, query, sort, then (for `All`) actives ahead of inactives
/// with the sort order kept inside each group, then paginate.
pub fn campaign_view<'a>(
    campaigns: &'a [Campaign],
    status: CampaignStatus,
    state: &mut ViewState<CampaignField, CampaignSortKey>,
) -> Page<&'a Campaign> {
    let rows = state.derive(campaigns.iter().filter(|c| status.admits(c)), &());
    let rows = if status == CampaignStatus::All {
        let (mut active, inactive): (Vec<_>, Vec<_>) = rows.into_iter().partition(|c| c.is_active());
        active.extend(inactive);
        active
    } else {
        rows
    };
    state.pager_mut().apply(rows)
}
