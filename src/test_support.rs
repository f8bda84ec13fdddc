use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::rc::Rc;
use std::thread;
use crate::errors::TransportError;
use crate::transport::{Fetch, Reply};

/// Scripted fetcher, hands out canned answers in order and records every request
pub struct ScriptedFetch {
    answers: RefCell<VecDeque<Result<Reply, TransportError>>>,
    calls: Rc<RefCell<Vec<String>>>,
    on_fetch: Option<Box<dyn Fn()>>,
}

impl ScriptedFetch {
    pub fn new() -> Self {
        Self { answers: RefCell::new(VecDeque::new()), calls: Rc::new(RefCell::new(Vec::new())), on_fetch: None }
    }

    pub fn reply(self, status: u16, body: &str) -> Self {
        self.answers.borrow_mut().push_back(Ok(Reply { status, body: body.to_string() }));
        self
    }

    pub fn fail(self, cause: &str) -> Self {
        self.answers.borrow_mut().push_back(Err(TransportError(cause.to_string())));
        self
    }

    /// Runs the hook on every fetch, before the answer is handed out
    pub fn on_fetch(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_fetch = Some(Box::new(hook));
        self
    }

    /// Returns a handle to the request log that survives moving the fetcher
    pub fn calls(&self) -> Rc<RefCell<Vec<String>>> {
        self.calls.clone()
    }
}

impl Fetch for ScriptedFetch {
    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Reply, TransportError> {
        let query = query.iter().map(|(k, v)| format!("{}={}", k, v)).collect::<Vec<String>>().join("&");
        let call = if query.is_empty() { path.to_string() } else { format!("{}?{}", path, query) };
        self.calls.borrow_mut().push(call);

        if let Some(hook) = &self.on_fetch {
            hook();
        }

        self.answers.borrow_mut().pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted answer left".to_string())))
    }
}

/// Answers exactly one http request on a local port with the given raw response and
/// returns the base url to reach it
pub fn serve_once(response: &'static [u8]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request: Vec<u8> = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        stream.write_all(response).unwrap();
        stream.flush().unwrap();
    });

    base_url
}

pub const DAILY_JSON: &str = r#"{
    "generated_at": "2025-06-01T08:30:00Z",
    "location": { "name": "La Jolla Shores", "lat": 32.8567, "lon": -117.2574 },
    "model_version": "1.0-climatology",
    "forecasts": [
        {
            "date": "2025-06-04", "day_of_week": "Wednesday", "score": 35, "rating": "Fair",
            "conditions": {
                "moon": { "phase": "Waxing Crescent", "illumination": 0.41 },
                "tide": { "level": 0.62 },
                "wave_height_m": 1.1, "water_temp_c": 19.4
            },
            "recommendation": "Fair conditions."
        },
        {
            "date": "2025-06-02", "day_of_week": "Monday", "score": 74, "rating": "Excellent",
            "conditions": {
                "moon": { "phase": "New Moon", "illumination": 0.03, "dark_night": true },
                "tide": { "level": -0.35, "near_low_tide": true, "low_tide_times": ["21:40"] },
                "wave_height_m": 0.7, "water_temp_c": 20.2
            },
            "recommendation": "Excellent conditions!"
        }
    ]
}"#;

pub const DETAILED_JSON: &str = r#"{
    "generated_at": "2025-06-01T08:30:00Z",
    "location": { "name": "La Jolla Shores", "lat": 32.8567, "lon": -117.2574 },
    "model_version": "1.0-climatology",
    "forecasts": [
        {
            "date": "2025-06-03", "day_of_week": "Tuesday",
            "avg_score": 48, "best_score": 90, "best_time": "09:00",
            "recommendation": "Recommended: 00:00",
            "timeslots": [
                { "time": "21:00", "score": 70, "icon": "🌟", "is_night": true, "conditions": { "tide_level": -0.2 } },
                { "time": "00:00", "score": 85, "icon": "🌟", "is_night": true, "conditions": { "tide_level": -0.4 } },
                { "time": "09:00", "score": 90, "icon": "🌟", "is_night": false, "conditions": { "tide_level": 0.5 } }
            ]
        },
        {
            "date": "2025-06-02", "day_of_week": "Monday",
            "avg_score": 30, "best_score": 40, "best_time": "12:00",
            "recommendation": "Conditions are average.",
            "timeslots": [
                { "time": "12:00", "score": 40, "icon": "💫", "is_night": false, "conditions": { "tide_level": 0.1 } },
                { "time": "15:00", "score": 20, "icon": "⭐", "is_night": false, "conditions": { "tide_level": 0.3 } }
            ]
        }
    ]
}"#;

pub const QUERY_JSON: &str = r#"{
    "success": true,
    "start_date": "2024-03-10",
    "end_date": "2024-03-16",
    "week_avg_score": 52.4,
    "metadata": {
        "location": "La Jolla Shores (Scripps Nearshore)",
        "generated_at": "2024-03-09T18:00:00Z",
        "model_version": "1.0-climatology"
    },
    "forecasts": [
        {
            "date": "2024-03-11", "day_of_week": "Monday",
            "avg_score": 50, "best_score": 66, "best_time": "03:00",
            "recommendation": "Recommended: 03:00",
            "timeslots": [
                { "time": "00:00", "score": 61, "icon": "✨", "is_night": true, "conditions": { "tide_level": -0.1 } },
                { "time": "03:00", "score": 66, "icon": "✨", "is_night": true, "conditions": { "tide_level": -0.3 } }
            ]
        },
        {
            "date": "2024-03-10", "day_of_week": "Sunday",
            "avg_score": 55, "best_score": 71, "best_time": "21:00",
            "recommendation": "Best window: 21:00",
            "timeslots": [
                { "time": "18:00", "score": 58, "icon": "✨", "is_night": false, "conditions": { "tide_level": 0.2 } },
                { "time": "21:00", "score": 71, "icon": "🌟", "is_night": true, "conditions": { "tide_level": -0.2 } }
            ]
        }
    ]
}"#;
