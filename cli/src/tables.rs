use fleetdash_core::{DriverRecord, Vehicle};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct DriverRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct VehicleRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Plate")]
    plate: String,
}

fn short_id(id: &uuid::Uuid) -> String {
    id.to_string()[..8].to_string()
}

pub fn print_drivers(drivers: &[DriverRecord]) {
    let rows: Vec<DriverRow> = drivers.iter().map(|d| DriverRow {
        id: short_id(&d.id),
        name: d.full_name(),
        email: d.email.clone(),
        phone: d.phone.clone(),
        status: d.status.clone(),
    }).collect();

    print_table(Table::new(rows));
    println!("{} driver(s)", drivers.len());
}

/// Every table the CLI prints goes through here: modern borders, cyan header.
pub fn print_table(table: Table) {
    println!("{}", render(table));
}

fn render(mut table: Table) -> String {
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table.to_string()
}

pub fn print_vehicles(vehicles: &[Vehicle]) {
    let rows: Vec<VehicleRow> = vehicles.iter().map(|v| VehicleRow {
        id: short_id(&v.id),
        name: v.name.clone(),
        plate: v.plate.clone(),
    }).collect();

    print_table(Table::new(rows));
}
