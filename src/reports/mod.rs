use cartable::aggregate::{duplicate_models, ChartRow, ScoreCard};
use cartable::car::CarRecord;
use cartable::scorer::presence::breakdown;
use cartable::scorer::table::INTERIOR;
use cartable::scorer::Category;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use strum::IntoEnumIterator;

fn score_cell(score: f64) -> Cell {
    let cell = Cell::new(format!("{:.1}", score));
    if score >= 7.0 {
        cell.fg(Color::Green)
    } else if score >= 4.0 {
        cell.fg(Color::Yellow)
    } else {
        cell.fg(Color::Red)
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, from: usize, to: usize) {
    for i in from..=to {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

/// The comparison chart: one row per category, one column per car.
pub fn print_chart(rows: &[ChartRow]) {
    let Some(first) = rows.first() else {
        return;
    };
    let mut table = new_table();

    let mut header = vec![Cell::new("Category").add_attribute(Attribute::Bold)];
    header.extend(first.columns.iter().map(|c| {
        let label = match c.id {
            Some(id) => format!("{} {}", c.model, id),
            None => c.model.clone(),
        };
        Cell::new(label).fg(Color::Cyan)
    }));
    table.add_row(header);
    align_right(&mut table, 1, first.columns.len());

    for row in rows {
        let mut cells = vec![Cell::new(row.category.to_string()).add_attribute(Attribute::Bold)];
        cells.extend(row.columns.iter().map(|c| score_cell(c.score)));
        table.add_row(cells);
    }
    println!("\n{}", table);
}

pub fn print_score_cards(cars: &[CarRecord], cards: &[ScoreCard]) {
    let mut table = new_table();

    let mut header = vec![Cell::new("Car").add_attribute(Attribute::Bold)];
    header.extend(Category::iter().map(|c| Cell::new(c.to_string())));
    header.push(Cell::new("Overall").add_attribute(Attribute::Bold));
    table.add_row(header);
    align_right(&mut table, 1, Category::iter().count() + 1);

    let dups = duplicate_models(cars);
    let best = cards.iter().map(|c| c.overall()).fold(f64::MIN, f64::max);

    for (car, card) in cars.iter().zip(cards) {
        let name = car.display_name();
        let name_cell = if dups.contains(&car.model) {
            Cell::new(format!("{} (duplicate model)", name)).fg(Color::Yellow)
        } else {
            Cell::new(name).add_attribute(Attribute::Bold)
        };

        let mut cells = vec![name_cell];
        cells.extend(Category::iter().map(|c| score_cell(card.get(c))));

        let overall = card.overall();
        let overall_cell = Cell::new(format!("{:.1}", overall)).add_attribute(Attribute::Bold);
        cells.push(if overall == best {
            overall_cell.fg(Color::Green)
        } else {
            overall_cell
        });
        table.add_row(cells);
    }
    println!("\n{}", table);
}

pub fn print_interior_breakdown(cars: &[CarRecord]) {
    let mut table = new_table();

    let mut header = vec![Cell::new("Interior").add_attribute(Attribute::Bold)];
    header.extend(cars.iter().map(|c| Cell::new(c.display_name()).fg(Color::Cyan)));
    table.add_row(header);
    align_right(&mut table, 1, cars.len());

    let per_car: Vec<_> = cars.iter().map(|c| breakdown(c, INTERIOR)).collect();
    for (idx, spec) in INTERIOR.iter().enumerate() {
        let mut cells = vec![Cell::new(format!("{} (/{})", spec.name, spec.max_points))];
        cells.extend(
            per_car
                .iter()
                .map(|items| Cell::new(format!("{}", items[idx].1))),
        );
        table.add_row(cells);
    }
    println!("\n{}", table);
}
