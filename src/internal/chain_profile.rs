#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::indexing_slicing)]

use chainmap::{ChainedHashMap, logger};
use log::info;
use plotters::prelude::*;

// Each run inserts keys 0..N into a fresh map
const SIZES: [u64; 3] = [1_000, 5_000, 20_000];

const FONT_FAMILY: &str = "sans-serif";
const TEXT_SIZE: u32 = 16;
const TITLE_SIZE: u32 = 35;

const COLORS: [RGBColor; 3] = [
    RGBColor(220, 50, 50), // red
    RGBColor(50, 90, 220), // blue
    RGBColor(50, 180, 50), // green
];

struct Profile {
    keys: u64,
    // capacity observed after each insert
    growth: Vec<usize>,
    // histogram[len] = number of slots whose chain has `len` entries
    histogram: Vec<usize>,
    load_factor: f64,
}

fn profile(keys: u64) -> Profile {
    let mut map = ChainedHashMap::new();
    let mut growth = Vec::new();

    for key in 0..keys {
        map.put(key, key.wrapping_mul(3));
        growth.push(map.capacity());
    }

    Profile { keys, growth, histogram: chain_histogram(&map), load_factor: map.load_factor() }
}

fn chain_histogram(map: &ChainedHashMap<u64, u64>) -> Vec<usize> {
    let lengths = map.chain_lengths();
    let longest = lengths.iter().copied().max().unwrap_or(0);
    let mut histogram = vec![0; longest + 1];
    for len in lengths {
        histogram[len] += 1;
    }
    histogram
}

fn draw_capacity_growth(profile: &Profile) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new("capacity_growth.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let growth = &profile.growth;
    let final_capacity = growth.last().copied().unwrap_or(1);
    let max_capacity = final_capacity + final_capacity / 10;

    let mut chart = ChartBuilder::on(&root)
        .caption("Table Capacity While Inserting", (FONT_FAMILY, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(0..growth.len(), 0..max_capacity)?;

    chart
        .configure_mesh()
        .x_desc("Number of Keys Inserted")
        .y_desc("Capacity (slots)")
        .axis_desc_style((FONT_FAMILY, TEXT_SIZE))
        .draw()?;

    let capacity_style = ShapeStyle::from(&BLUE).stroke_width(2);
    chart
        .draw_series(LineSeries::new(
            growth.iter().enumerate().map(|(inserted, &capacity)| (inserted + 1, capacity)),
            capacity_style,
        ))?
        .label("capacity")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], capacity_style));

    // Resize threshold: 3/4 of the slots
    let threshold_style = ShapeStyle::from(&RED.mix(0.5)).stroke_width(1);
    chart
        .draw_series(LineSeries::new(
            growth.iter().enumerate().map(|(inserted, &capacity)| (inserted + 1, capacity * 3 / 4)),
            threshold_style,
        ))?
        .label("resize threshold")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], threshold_style));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn draw_chain_lengths(profiles: &[Profile]) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new("chain_lengths.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let longest = profiles.iter().map(|p| p.histogram.len()).max().unwrap_or(1);

    let mut chart = ChartBuilder::on(&root)
        .caption("Share of Slots by Chain Length", (FONT_FAMILY, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(0..longest, 0.0..100.0)?;

    chart
        .configure_mesh()
        .x_desc("Chain Length")
        .y_desc("Slots (%)")
        .axis_desc_style((FONT_FAMILY, TEXT_SIZE))
        .draw()?;

    for (profile, color) in profiles.iter().zip(COLORS.iter().cycle()) {
        let slots: usize = profile.histogram.iter().sum();
        let line_style = ShapeStyle::from(color).stroke_width(2);

        chart
            .draw_series(LineSeries::new(
                profile
                    .histogram
                    .iter()
                    .enumerate()
                    .map(|(len, &count)| (len, count as f64 * 100.0 / slots as f64)),
                line_style,
            ))?
            .label(format!("{} keys", profile.keys))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(profile.histogram.iter().enumerate().map(|(len, &count)| {
            Circle::new((len, count as f64 * 100.0 / slots as f64), 4, color.filled())
        }))?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::initialize_logger();

    let profiles: Vec<Profile> = SIZES.iter().map(|&keys| profile(keys)).collect();

    for profile in &profiles {
        info!(
            "{} keys: capacity = {}, load factor = {:.3}",
            profile.keys,
            profile.growth.last().copied().unwrap_or(0),
            profile.load_factor
        );
        for (len, slots) in profile.histogram.iter().enumerate() {
            info!("  chains of length {len}: {slots} slots");
        }
    }

    if let Some(largest) = profiles.last() {
        draw_capacity_growth(largest)?;
    }
    draw_chain_lengths(&profiles)?;

    info!("Generated plot images: capacity_growth.png, chain_lengths.png");

    Ok(())
}
