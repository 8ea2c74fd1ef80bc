use crate::adapters::{DisplayBoard, SliderControl};
use crate::domain::model::{
    format_air_pressure, format_humidity, format_temperature, ElementLayout, SimulatedReadings,
};
use crate::domain::ports::SensorSource;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

pub const TEMPERATURE_RANGE: (f64, f64) = (20.0, 30.0);
pub const HUMIDITY_RANGE: (f64, f64) = (50.0, 70.0);
/// 0% PWM 時的氣流 (km/h)
pub const BASE_PRESSURE: f64 = 500.0;
/// 100% PWM 時額外增加的氣流 (km/h)
pub const MAX_ADDITIONAL_PRESSURE: f64 = 1500.0;

/// Air pressure follows the PWM setting linearly.
pub fn air_pressure_for(pwm: i64) -> i64 {
    (BASE_PRESSURE + MAX_ADDITIONAL_PRESSURE * (pwm as f64 / 100.0)).round() as i64
}

/// Stand-in for the device: random DHT11-like readings plus a PWM-driven
/// air pressure.
pub struct SimulatedSource {
    rng: Mutex<StdRng>,
    slider: SliderControl,
    board: DisplayBoard,
    layout: ElementLayout,
}

impl SimulatedSource {
    pub fn new(
        board: DisplayBoard,
        slider: SliderControl,
        layout: ElementLayout,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
            slider,
            board,
            layout,
        }
    }

    pub fn sample(&self) -> SimulatedReadings {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        SimulatedReadings {
            temperature: rng.random_range(TEMPERATURE_RANGE.0..=TEMPERATURE_RANGE.1),
            humidity: rng.random_range(HUMIDITY_RANGE.0..=HUMIDITY_RANGE.1),
            air_pressure: air_pressure_for(self.slider.value()),
        }
    }

    pub fn render(&self, readings: &SimulatedReadings) {
        self.board
            .set_text(&self.layout.temperature, format_temperature(readings.temperature));
        if let Some(humidity_id) = &self.layout.humidity {
            self.board
                .set_text(humidity_id, format_humidity(readings.humidity));
        }
        self.board
            .set_text(&self.layout.air_speed, format_air_pressure(readings.air_pressure));
    }
}

#[async_trait]
impl SensorSource for SimulatedSource {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn refresh(&self) {
        let readings = self.sample();
        tracing::debug!("Simulated readings: {:?}", readings);
        self.render(&readings);
    }
}
