use strum::{Display, EnumIter, EnumString};

use super::filter::{Searchable, number_text};
use super::sort::{SortValue, Sortable};
use crate::model::Router;

/// Router columns, usable as search scope and as sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum RouterField {
    Id,
    Serial,
    Mac,
    DeviceName,
    Estacion,
    Municipio,
    Latitud,
    Longitud,
    GroupName,
}

impl Searchable for Router {
    type Field = RouterField;
    type Context = ();

    const ALL_FIELDS: &'static [RouterField] = &[
        RouterField::Id,
        RouterField::Mac,
        RouterField::DeviceName,
        RouterField::Estacion,
        RouterField::Municipio,
        RouterField::Latitud,
        RouterField::Longitud,
        RouterField::GroupName,
    ];

    fn field_text(&self, field: RouterField, _: &()) -> Option<String> {
        match field {
            RouterField::Id => Some(self.id.to_string()),
            RouterField::Serial => self.serial.clone(),
            RouterField::Mac => self.mac.clone(),
            RouterField::DeviceName => self.device_name.clone(),
            RouterField::Estacion => self.estacion.clone(),
            RouterField::Municipio => self.municipio.clone(),
            RouterField::Latitud => number_text(self.latitud),
            RouterField::Longitud => number_text(self.longitud),
            RouterField::GroupName => self.group_name.clone(),
        }
    }
}

impl Sortable for Router {
    type Key = RouterField;
    type Context = ();

    fn sort_values(&self, key: RouterField, _: &()) -> Vec<SortValue> {
        let value = match key {
            RouterField::Id => SortValue::number(self.id.as_number()),
            RouterField::Latitud => SortValue::number(self.latitud),
            RouterField::Longitud => SortValue::number(self.longitud),
            RouterField::Serial => SortValue::text(self.serial.as_deref()),
            RouterField::Mac => SortValue::text(self.mac.as_deref()),
            RouterField::DeviceName => SortValue::text(self.device_name.as_deref()),
            RouterField::Estacion => SortValue::text(self.estacion.as_deref()),
            RouterField::Municipio => SortValue::text(self.municipio.as_deref()),
            RouterField::GroupName => SortValue::text(self.group_name.as_deref()),
        };
        vec![value]
    }
}
