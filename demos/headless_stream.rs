use std::thread;
use std::time::Duration;

use streamplot::{HeadlessSurface, Session, SessionConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let (surface, handle) = HeadlessSurface::new();
    let session = Session::with_surface(SessionConfig::default(), move || surface);

    session.set_name(0, "sin").unwrap();
    session.set_name(1, "cos").unwrap();
    session.add_to_group(0, 0).unwrap();
    session.add_to_group(0, 1).unwrap();
    session.set_group_name(0, "waves").unwrap();
    session.set_mode_tail_count(500);
    session.show_group(0).unwrap();

    let producers: Vec<_> = (0..2u32)
        .map(|series| {
            let session = session.clone();
            thread::spawn(move || {
                let mut phase = 0.0_f64;
                for _ in 0..200 {
                    let batch: Vec<f64> = (0..20)
                        .map(|_| {
                            phase += 0.01;
                            if series == 0 { phase.sin() } else { phase.cos() }
                        })
                        .collect();
                    session.append_numbers(series, &batch).unwrap();
                    thread::sleep(Duration::from_millis(5));
                }
            })
        })
        .collect();

    for producer in producers {
        producer.join().unwrap();
    }
    thread::sleep(Duration::from_millis(100));

    let commands = handle
        .last_frame()
        .map(|frame| frame.commands().len())
        .unwrap_or_default();
    println!(
        "drew {} frames, last frame had {commands} commands",
        handle.frames()
    );
}
