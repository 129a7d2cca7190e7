use log::LevelFilter;
use rusty_relay::{Config, Event, Kind, Listener, Network, Recorder, log::ChannelLogger};

const READING: Kind = 1;
const TOO_COLD: Kind = 2;
const TOO_HOT: Kind = 3;
const ALARM: Kind = 4;

/// Turns temperature readings into heating and alarm events.
struct Thermostat {
    low: f32,
    high: f32,
}

impl Listener for Thermostat {
    fn react(&mut self, event: &Event) -> Vec<Event> {
        if event.kind() != READING {
            return Vec::new();
        }
        match event.downcast_payload::<f32>() {
            Some(&celsius) if celsius < self.low => vec![Event::with_payload(TOO_COLD, celsius)],
            Some(&celsius) if celsius > self.high => {
                vec![Event::with_payload(TOO_HOT, celsius), Event::new(ALARM)]
            }
            _ => Vec::new(),
        }
    }
}

fn main() {
    let log_recv = match ChannelLogger::install(LevelFilter::Debug) {
        Ok(receiver) => receiver,
        Err(err) => {
            eprintln!("logger already installed: {}", err);
            return;
        }
    };

    let mut network = Network::with_config(Config::default().with_max_depth(8));
    let sensor = network.insert_relay();
    let thermostat = network.insert(Thermostat {
        low: 18.0,
        high: 26.0,
    });
    let heater = network.insert(Recorder::new());
    let siren = network.insert(Recorder::new());

    let wiring = [
        (sensor, thermostat),
        (thermostat, heater),
        (thermostat, siren),
    ];
    for (node, listener) in wiring {
        if let Err(err) = network.add_listener(node, listener) {
            eprintln!("wiring failed: {}", err);
            return;
        }
    }

    for celsius in [21.5_f32, 12.0, 31.0] {
        match network.broadcast(sensor, Event::with_payload(READING, celsius)) {
            Ok(report) => println!("{:>5.1}C: {}", celsius, report),
            Err(err) => eprintln!("broadcast failed: {}", err),
        }
    }

    for (name, id) in [("heater", heater), ("siren", siren)] {
        if let Some(recorder) = network.get::<Recorder>(id) {
            println!("{} saw kinds {:?}", name, recorder.kinds());
        }
    }

    for message in log_recv.try_iter() {
        println!("{} - {}", message.level, message.message);
    }
}
