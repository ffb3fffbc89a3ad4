//! 터미널 결과 표.

use comfy_table::{modifiers, presets, Attribute, Cell, CellAlignment, Color, Table};

use crate::config::DefaultUnits;
use crate::estimation::{monthly_units, AreaAssessment, EstimationResult, Preset, ProjectionSeries};
use crate::i18n::{keys, Translator};
use crate::report::CURRENCY_SYMBOL;
use crate::units::{convert_area, convert_energy, AreaUnit, EnergyUnit};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}

fn right(value: impl std::fmt::Display) -> Cell {
    Cell::new(value).set_alignment(CellAlignment::Right)
}

pub fn build_result_table(result: &EstimationResult, tr: &Translator, units: &DefaultUnits) -> Table {
    let c = CURRENCY_SYMBOL;
    let energy = convert_energy(result.monthly_units, EnergyUnit::KilowattHour, units.energy);
    let area = convert_area(result.area_m2, AreaUnit::SquareMeter, units.area);
    let area_cell = match result.area_comment {
        AreaAssessment::Unspecified => right(format!("{area:.2} {}", units.area.symbol())),
        AreaAssessment::Sufficient => right(format!(
            "{area:.2} {} ({})",
            units.area.symbol(),
            tr.t(keys::RESULT_AREA_SUFFICIENT)
        ))
        .fg(Color::Green),
        AreaAssessment::Insufficient => right(format!(
            "{area:.2} {} ({})",
            units.area.symbol(),
            tr.t(keys::RESULT_AREA_INSUFFICIENT)
        ))
        .fg(Color::Red),
    };

    let mut table = new_table();
    table.set_header(vec![tr.t(keys::TABLE_ITEM), tr.t(keys::TABLE_VALUE)]);
    table.add_row(vec![
        Cell::new(tr.t(keys::RESULT_MONTHLY_UNITS)).add_attribute(Attribute::Dim),
        right(format!("{energy:.2} {}", units.energy.symbol())).add_attribute(Attribute::Dim),
    ]);
    table.add_row(vec![
        Cell::new(tr.t(keys::RESULT_REQUIRED_SYSTEM)),
        right(format!("{} kW", result.required_kw)).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new(tr.t(keys::RESULT_AREA)), area_cell]);
    table.add_row(vec![
        Cell::new(tr.t(keys::RESULT_COST)),
        right(format!("{c}{}", result.cost)),
    ]);
    table.add_row(vec![
        Cell::new(tr.t(keys::RESULT_GRID_BILL)),
        right(format!("{c}{}", result.monthly_grid_bill)),
    ]);
    table.add_row(vec![
        Cell::new(tr.t(keys::RESULT_SAVINGS)),
        right(format!("{c}{}", result.monthly_savings)).fg(Color::Green),
    ]);
    table.add_row(vec![
        Cell::new(tr.t(keys::RESULT_PAYBACK)),
        right(format!("{} y", result.payback_years)),
    ]);
    table.add_row(vec![
        Cell::new(tr.t(keys::RESULT_BATTERY)),
        right(format!("{} kWh", result.battery_kwh)),
    ]);
    table.add_row(vec![
        Cell::new(tr.t(keys::RESULT_BATTERY_COUNT)),
        right(result.battery_count),
    ]);
    table
}

pub fn build_projection_table(projection: &ProjectionSeries, tr: &Translator) -> Table {
    let c = CURRENCY_SYMBOL;
    let mut table = new_table();
    table.set_header(vec![
        tr.t(keys::TABLE_YEAR),
        tr.t(keys::TABLE_GRID_COST),
        tr.t(keys::TABLE_SOLAR_SAVINGS),
        tr.t(keys::TABLE_NET_SOLAR),
    ]);
    for i in 0..projection.years {
        let grid = projection.cumulative_grid_cost[i];
        let net = projection.cumulative_net_solar_cost[i];
        let year = Cell::new(i + 1);
        let year = if projection.payback_year_index == Some(i) {
            year.fg(Color::Blue).add_attribute(Attribute::Bold)
        } else {
            year
        };
        table.add_row(vec![
            year,
            right(format!("{c}{grid:.0}")).fg(Color::Red),
            right(format!("{c}{:.0}", projection.cumulative_solar_savings[i]))
                .add_attribute(Attribute::Dim),
            right(format!("{c}{net:.0}")).fg(if net <= grid { Color::Green } else { Color::Reset }),
        ]);
    }
    table
}

pub fn build_presets_table(tr: &Translator) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        tr.t(keys::TABLE_PRESET),
        tr.t(keys::TABLE_APPLIANCE),
        tr.t(keys::TABLE_POWER),
        tr.t(keys::TABLE_HOURS),
        tr.t(keys::TABLE_DAYS),
        "kWh",
    ]);
    for preset in Preset::ALL {
        let appliances = preset.appliances();
        table.add_row(vec![
            Cell::new(preset.name()).add_attribute(Attribute::Bold),
            Cell::new(""),
            Cell::new(""),
            Cell::new(""),
            Cell::new(""),
            right(format!("{:.2}", monthly_units(&appliances))).add_attribute(Attribute::Bold),
        ]);
        for a in &appliances {
            table.add_row(vec![
                Cell::new(""),
                Cell::new(&a.name),
                right(a.power),
                right(a.hours_per_day),
                right(a.days_per_month),
                right(format!("{:.2}", a.watt_hours_per_month() / 1000.0))
                    .add_attribute(Attribute::Dim),
            ]);
        }
    }
    table
}
