use log::{info, warn};
use rand::Rng;
use rocket_governor::*;

const TARGET_MARGIN: f64 = 30.0;
const TARGET_RADIUS: f64 = 15.0;

fn load_envelope() -> Result<FlightEnvelope, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let document = std::fs::read_to_string(&path)?;
            info!("Loading flight envelope from {}", path);
            Ok(FlightEnvelope::from_json(&document)?)
        }
        None => Ok(FlightEnvelope::default()),
    }
}

fn random_target(world: &World, rng: &mut impl Rng) -> (f64, f64) {
    (
        rng.gen_range(TARGET_MARGIN..world.width - TARGET_MARGIN),
        rng.gen_range(TARGET_MARGIN..world.height - TARGET_MARGIN),
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let envelope = load_envelope()?;
    let world = World::default();
    let vehicle = Vehicle::on_floor(VEHICLE_WIDTH, VEHICLE_HEIGHT, &envelope, &world);
    let mut session = FlightSession::new(MotionGovernor::new(envelope, world), vehicle);

    // The pilot sees vehicle snapshots and answers through the intent slot;
    // the tick loop never waits for it.
    let (snapshots, pilot) = spawn_pilot(
        RandomPilot::new(0x5eed, PILOT_DECISION_INTERVAL),
        session.intent_slot(),
    );

    let mut rng = rand::thread_rng();
    let mut target = random_target(&world, &mut rng);
    let mut episodes = 0u32;

    for _ in 0..MAX_SIMULATION_TICKS {
        if let Err(e) = session.tick() {
            warn!("Error during simulation tick: {}", e);
            break;
        }

        let (cx, cy) = session.vehicle.center();
        if (target.0 - cx).abs() + (target.1 - cy).abs() <= TARGET_RADIUS {
            episodes += 1;
            info!(
                "Target ({:.0}, {:.0}) reached after {} ticks",
                target.0,
                target.1,
                session.episode_ticks()
            );
            session.reset();
            target = random_target(&world, &mut rng);
        }

        if snapshots.send(session.vehicle.clone()).is_err() {
            break;
        }
    }

    drop(snapshots);
    if pilot.join().is_err() {
        warn!("Pilot thread panicked");
    }

    session.telemetry.display_data(TICKS_PER_SECOND);
    info!("Episodes completed: {}", episodes);

    Ok(())
}
