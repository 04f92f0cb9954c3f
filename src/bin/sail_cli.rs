use clap::Parser;
use log::info;
use sailing_sim::engine::angles::{deg_to_rad, rad_to_deg, to_compass_degrees, true_wind_angle};
use sailing_sim::engine::config::SimConfig;
use sailing_sim::engine::models::{Boat, Wind};
use sailing_sim::engine::physics::PhysicsModel;
use sailing_sim::engine::wind::WindOscillator;
use sailing_sim::parsers::polars::PolarData;
use std::path::PathBuf;
use std::time::Instant;

/// Headless run of the boat physics, optionally producing a speed polar
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON config file; defaults are used for anything it leaves out
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Simulated seconds
    #[arg(short, long, default_value_t = 10.0)]
    seconds: f32,

    /// Integration step in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Initial heading in degrees
    #[arg(long, default_value_t = 45.0)]
    heading_deg: f32,

    #[arg(long, default_value_t = 0.5)]
    sheet: f32,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    rudder: f32,

    /// Overrides the configured wind speed (m/s)
    #[arg(long)]
    wind_speed: Option<f32>,

    /// Overrides the configured wind direction (degrees, blowing from)
    #[arg(long, allow_hyphen_values = true)]
    wind_dir_deg: Option<f32>,

    /// Swing the wind direction as the interactive app does
    #[arg(long)]
    oscillate: bool,

    /// Write a speed polar CSV here instead of running the trace
    #[arg(long)]
    polar_out: Option<PathBuf>,

    /// Compare the final simulated speed with this polar's prediction
    #[arg(long)]
    polar_in: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimConfig::load_json(path)?,
        None => SimConfig::default(),
    };
    if let Some(speed) = args.wind_speed {
        config.wind.speed = speed;
    }
    if let Some(dir) = args.wind_dir_deg {
        config.wind.direction = deg_to_rad(dir);
    }
    config.validate()?;
    if args.dt <= 0.0 {
        return Err("--dt must be positive".into());
    }

    let physics = PhysicsModel::new(config.physics.clone());

    if let Some(path) = &args.polar_out {
        let start_time = Instant::now();
        let twa: Vec<f32> = (0..=36).map(|i| i as f32 * 5.0).collect();
        let tws: Vec<f32> = vec![2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 15.0, 20.0];
        let polar = physics.sweep_polar(&twa, &tws, args.sheet, args.seconds, args.dt);
        polar.write_csv(path)?;
        info!("Polar written to {:?} in {:?}", path, start_time.elapsed());
        return Ok(());
    }

    let polar = args.polar_in.as_ref().map(PolarData::load_from_csv).transpose()?;

    let mut boat = Boat::new();
    boat.heading = deg_to_rad(args.heading_deg);
    boat.set_sheet(args.sheet);
    boat.set_rudder(args.rudder);

    let mut wind = Wind::new(config.wind.speed, config.wind.direction);
    let mut oscillator = WindOscillator::from_config(&config.wind);

    println!("--- Sailing physics trace ---");
    println!(
        "{:>6} {:>9} {:>9} {:>7} {:>7} {:>6} {:>6} {:>7}",
        "t(s)", "x(m)", "y(m)", "v(m/s)", "hdg", "heel", "sail", "wind"
    );

    let steps = (args.seconds / args.dt).round() as usize;
    let per_second = (1.0 / args.dt).round().max(1.0) as usize;
    for step in 1..=steps {
        if args.oscillate {
            oscillator.advance(args.dt, &mut wind);
        }
        physics.step(&mut boat, &wind, args.dt);

        if step % per_second == 0 || step == steps {
            println!(
                "{:>6.2} {:>9.2} {:>9.2} {:>7.2} {:>7.1} {:>6.1} {:>6.1} {:>7.1}",
                step as f32 * args.dt,
                boat.position.x,
                boat.position.y,
                boat.speed_along_heading(),
                to_compass_degrees(boat.heading),
                rad_to_deg(boat.heel),
                rad_to_deg(boat.sail_angle),
                to_compass_degrees(wind.direction),
            );
        }
    }

    if let Some(polar) = &polar {
        let twa = rad_to_deg(true_wind_angle(boat.heading, wind.direction));
        let predicted = polar.get_speed(wind.speed, twa);
        println!(
            "Polar at TWA {:.0}° TWS {:.1} m/s: {:.2} m/s, simulated {:.2} m/s",
            twa,
            wind.speed,
            predicted,
            boat.speed_along_heading()
        );
    }

    Ok(())
}
