//! Built-in conversion tables.
//!
//! Every [`ConversionDefinition`] pairs a source and target [`Unit`] with one
//! of the closed set of [`Conversion`] operations, the practical range that
//! source values are drawn from, and the tolerance (in percent of the correct
//! answer) a learner is allowed. Both directions of a unit family are separate
//! definitions, so `miles -> km` and `km -> miles` can carry different ranges.

use serde::{Deserialize, Serialize};
use tracing::error;

/// Kilometers in one international mile
pub const KM_PER_MILE: f64 = 1.609344;
/// Centimeters in one inch
pub const CM_PER_INCH: f64 = 2.54;
/// Meters in one foot
pub const METERS_PER_FOOT: f64 = 0.3048;
/// Meters in one yard
pub const METERS_PER_YARD: f64 = 0.9144;
/// Kilograms in one avoirdupois pound
pub const KG_PER_POUND: f64 = 0.453_592_37;
/// Grams in one avoirdupois ounce
pub const GRAMS_PER_OUNCE: f64 = 28.349_523_125;
/// Milliliters in one US customary cup
pub const ML_PER_CUP: f64 = 236.588_236_5;
/// Liters in one US gallon
pub const LITERS_PER_GALLON: f64 = 3.785_411_784;
/// Milliliters in one US fluid ounce
pub const ML_PER_FLUID_OUNCE: f64 = 29.573_529_562_5;
/// Offset between the Celsius and Kelvin scales
pub const KELVIN_OFFSET: f64 = 273.15;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
pub enum Category {
    Distance,
    Weight,
    Temperature,
    Volume,
}

impl Category {
    pub const COUNT: usize = 4;
    pub const ALL: [Category; Category::COUNT] = [
        Category::Distance,
        Category::Weight,
        Category::Temperature,
        Category::Volume,
    ];

    pub fn index(self) -> usize {
        match self {
            Category::Distance => 0,
            Category::Weight => 1,
            Category::Temperature => 2,
            Category::Volume => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Menu letter used when selecting categories (`a`..`d`)
    pub fn shorthand(self) -> char {
        match self {
            Category::Distance => 'a',
            Category::Weight => 'b',
            Category::Temperature => 'c',
            Category::Volume => 'd',
        }
    }

    pub fn from_shorthand(c: char) -> Option<Self> {
        Self::ALL.iter().copied().find(|cat| cat.shorthand() == c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Unit {
    pub name: &'static str,
    pub abbreviation: &'static str,
}

impl Unit {
    const fn new(name: &'static str, abbreviation: &'static str) -> Self {
        Self { name, abbreviation }
    }
}

pub const MILES: Unit = Unit::new("miles", "mi");
pub const KILOMETERS: Unit = Unit::new("kilometers", "km");
pub const INCHES: Unit = Unit::new("inches", "in");
pub const CENTIMETERS: Unit = Unit::new("centimeters", "cm");
pub const FEET: Unit = Unit::new("feet", "ft");
pub const METERS: Unit = Unit::new("meters", "m");
pub const YARDS: Unit = Unit::new("yards", "yd");
pub const POUNDS: Unit = Unit::new("pounds", "lb");
pub const KILOGRAMS: Unit = Unit::new("kilograms", "kg");
pub const OUNCES: Unit = Unit::new("ounces", "oz");
pub const GRAMS: Unit = Unit::new("grams", "g");
pub const FAHRENHEIT: Unit = Unit::new("degrees Fahrenheit", "°F");
pub const CELSIUS: Unit = Unit::new("degrees Celsius", "°C");
pub const KELVIN: Unit = Unit::new("kelvin", "K");
pub const CUPS: Unit = Unit::new("cups", "cup");
pub const MILLILITERS: Unit = Unit::new("milliliters", "ml");
pub const GALLONS: Unit = Unit::new("gallons", "gal");
pub const LITERS: Unit = Unit::new("liters", "L");
pub const FLUID_OUNCES: Unit = Unit::new("fluid ounces", "fl oz");

/// The closed set of pure conversion operations a definition can point at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Conversion {
    MilesToKm,
    KmToMiles,
    InchesToCm,
    CmToInches,
    FeetToMeters,
    MetersToFeet,
    YardsToMeters,
    MetersToYards,
    PoundsToKg,
    KgToPounds,
    OuncesToGrams,
    GramsToOunces,
    FahrenheitToCelsius,
    CelsiusToFahrenheit,
    CelsiusToKelvin,
    KelvinToCelsius,
    CupsToMl,
    MlToCups,
    GallonsToLiters,
    LitersToGallons,
    FluidOuncesToMl,
    MlToFluidOunces,
}

impl Conversion {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Conversion::MilesToKm => value * KM_PER_MILE,
            Conversion::KmToMiles => value / KM_PER_MILE,
            Conversion::InchesToCm => value * CM_PER_INCH,
            Conversion::CmToInches => value / CM_PER_INCH,
            Conversion::FeetToMeters => value * METERS_PER_FOOT,
            Conversion::MetersToFeet => value / METERS_PER_FOOT,
            Conversion::YardsToMeters => value * METERS_PER_YARD,
            Conversion::MetersToYards => value / METERS_PER_YARD,
            Conversion::PoundsToKg => value * KG_PER_POUND,
            Conversion::KgToPounds => value / KG_PER_POUND,
            Conversion::OuncesToGrams => value * GRAMS_PER_OUNCE,
            Conversion::GramsToOunces => value / GRAMS_PER_OUNCE,
            Conversion::FahrenheitToCelsius => (value - 32.0) * 5.0 / 9.0,
            Conversion::CelsiusToFahrenheit => value * 9.0 / 5.0 + 32.0,
            Conversion::CelsiusToKelvin => value + KELVIN_OFFSET,
            Conversion::KelvinToCelsius => value - KELVIN_OFFSET,
            Conversion::CupsToMl => value * ML_PER_CUP,
            Conversion::MlToCups => value / ML_PER_CUP,
            Conversion::GallonsToLiters => value * LITERS_PER_GALLON,
            Conversion::LitersToGallons => value / LITERS_PER_GALLON,
            Conversion::FluidOuncesToMl => value * ML_PER_FLUID_OUNCE,
            Conversion::MlToFluidOunces => value / ML_PER_FLUID_OUNCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConversionDefinition {
    pub from: Unit,
    pub to: Unit,
    pub conversion: Conversion,
    /// Inclusive sampling range over the source unit
    pub min: f64,
    pub max: f64,
    pub tolerance_percent: f64,
}

impl ConversionDefinition {
    const fn new(
        from: Unit,
        to: Unit,
        conversion: Conversion,
        min: f64,
        max: f64,
        tolerance_percent: f64,
    ) -> Self {
        Self {
            from,
            to,
            conversion,
            min,
            max,
            tolerance_percent,
        }
    }

    pub fn convert(&self, value: f64) -> f64 {
        self.conversion.apply(value)
    }
}

use Conversion::*;

static DISTANCE: [ConversionDefinition; 8] = [
    ConversionDefinition::new(MILES, KILOMETERS, MilesToKm, 1.0, 100.0, 2.0),
    ConversionDefinition::new(KILOMETERS, MILES, KmToMiles, 1.0, 160.0, 2.0),
    ConversionDefinition::new(INCHES, CENTIMETERS, InchesToCm, 1.0, 100.0, 1.5),
    ConversionDefinition::new(CENTIMETERS, INCHES, CmToInches, 1.0, 250.0, 1.5),
    ConversionDefinition::new(FEET, METERS, FeetToMeters, 1.0, 300.0, 2.0),
    ConversionDefinition::new(METERS, FEET, MetersToFeet, 1.0, 100.0, 2.0),
    ConversionDefinition::new(YARDS, METERS, YardsToMeters, 1.0, 100.0, 2.0),
    ConversionDefinition::new(METERS, YARDS, MetersToYards, 1.0, 100.0, 2.0),
];

static WEIGHT: [ConversionDefinition; 4] = [
    ConversionDefinition::new(POUNDS, KILOGRAMS, PoundsToKg, 1.0, 250.0, 2.0),
    ConversionDefinition::new(KILOGRAMS, POUNDS, KgToPounds, 1.0, 110.0, 2.0),
    ConversionDefinition::new(OUNCES, GRAMS, OuncesToGrams, 1.0, 32.0, 2.0),
    ConversionDefinition::new(GRAMS, OUNCES, GramsToOunces, 10.0, 1000.0, 2.0),
];

static TEMPERATURE: [ConversionDefinition; 4] = [
    ConversionDefinition::new(FAHRENHEIT, CELSIUS, FahrenheitToCelsius, -40.0, 212.0, 2.0),
    ConversionDefinition::new(CELSIUS, FAHRENHEIT, CelsiusToFahrenheit, -40.0, 100.0, 2.0),
    ConversionDefinition::new(CELSIUS, KELVIN, CelsiusToKelvin, -50.0, 100.0, 1.0),
    ConversionDefinition::new(KELVIN, CELSIUS, KelvinToCelsius, 223.0, 373.0, 1.0),
];

static VOLUME: [ConversionDefinition; 6] = [
    ConversionDefinition::new(CUPS, MILLILITERS, CupsToMl, 1.0, 10.0, 1.5),
    ConversionDefinition::new(MILLILITERS, CUPS, MlToCups, 50.0, 2500.0, 1.5),
    ConversionDefinition::new(GALLONS, LITERS, GallonsToLiters, 1.0, 20.0, 2.0),
    ConversionDefinition::new(LITERS, GALLONS, LitersToGallons, 1.0, 75.0, 2.0),
    ConversionDefinition::new(FLUID_OUNCES, MILLILITERS, FluidOuncesToMl, 1.0, 32.0, 1.5),
    ConversionDefinition::new(MILLILITERS, FLUID_OUNCES, MlToFluidOunces, 10.0, 1000.0, 1.5),
];

/// All definitions for a category; never empty for the built-in categories
pub fn lookup(category: Category) -> &'static [ConversionDefinition] {
    match category {
        Category::Distance => &DISTANCE,
        Category::Weight => &WEIGHT,
        Category::Temperature => &TEMPERATURE,
        Category::Volume => &VOLUME,
    }
}

/// Index-based lookup for callers holding a raw category number.
/// An out-of-range index yields an empty table.
pub fn lookup_index(index: usize) -> &'static [ConversionDefinition] {
    match Category::from_index(index) {
        Some(category) => lookup(category),
        None => {
            error!(index, "category index out of range");
            &[]
        }
    }
}

/// Iterate every built-in definition alongside its category
pub fn all_definitions() -> impl Iterator<Item = (Category, &'static ConversionDefinition)> {
    Category::ALL
        .into_iter()
        .flat_map(|category| lookup(category).iter().map(move |def| (category, def)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_definitions() {
        for category in Category::ALL {
            assert!(!lookup(category).is_empty(), "{category} has no definitions");
        }
    }

    #[test]
    fn test_ranges_are_ordered() {
        for (category, def) in all_definitions() {
            assert!(
                def.min <= def.max,
                "{category}: {} -> {} has min > max",
                def.from.name,
                def.to.name
            );
            assert!(def.tolerance_percent > 0.0);
        }
    }

    #[test]
    fn test_every_definition_has_its_inverse() {
        for (category, def) in all_definitions() {
            let inverse = lookup(category)
                .iter()
                .any(|other| other.from == def.to && other.to == def.from);
            assert!(inverse, "{} -> {} lacks a reverse", def.from.name, def.to.name);
        }
    }

    #[test]
    fn test_inverse_pairs_roundtrip() {
        let pairs = [
            (MilesToKm, KmToMiles),
            (InchesToCm, CmToInches),
            (FeetToMeters, MetersToFeet),
            (YardsToMeters, MetersToYards),
            (PoundsToKg, KgToPounds),
            (OuncesToGrams, GramsToOunces),
            (FahrenheitToCelsius, CelsiusToFahrenheit),
            (CelsiusToKelvin, KelvinToCelsius),
            (CupsToMl, MlToCups),
            (GallonsToLiters, LitersToGallons),
            (FluidOuncesToMl, MlToFluidOunces),
        ];
        for (forward, back) in pairs {
            let value = 37.5;
            assert!((back.apply(forward.apply(value)) - value).abs() < 1e-9);
        }
    }

    #[test]
    fn test_known_conversions() {
        assert!((MilesToKm.apply(10.0) - 16.09344).abs() < 1e-9);
        assert!((InchesToCm.apply(12.0) - 30.48).abs() < 1e-9);
        assert_eq!(FahrenheitToCelsius.apply(212.0), 100.0);
        assert_eq!(FahrenheitToCelsius.apply(32.0), 0.0);
        assert_eq!(CelsiusToFahrenheit.apply(-40.0), -40.0);
        assert_eq!(CelsiusToKelvin.apply(0.0), 273.15);
    }

    #[test]
    fn test_miles_km_calibration() {
        let miles = &lookup(Category::Distance)[0];
        assert_eq!(miles.from, MILES);
        assert_eq!((miles.min, miles.max, miles.tolerance_percent), (1.0, 100.0, 2.0));

        let km = &lookup(Category::Distance)[1];
        assert_eq!(km.from, KILOMETERS);
        assert_eq!((km.min, km.max, km.tolerance_percent), (1.0, 160.0, 2.0));
    }

    #[test]
    fn test_category_shorthand_roundtrip() {
        for category in Category::ALL {
            assert_eq!(Category::from_shorthand(category.shorthand()), Some(category));
            assert_eq!(Category::from_index(category.index()), Some(category));
        }
        assert_eq!(Category::from_shorthand('e'), None);
    }

    #[test]
    fn test_lookup_index_out_of_range_is_empty() {
        assert!(lookup_index(Category::COUNT).is_empty());
        assert_eq!(lookup_index(0).len(), lookup(Category::Distance).len());
    }
}
