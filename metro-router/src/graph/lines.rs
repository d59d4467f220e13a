//! The fixed table of metro lines.
//!
//! The metro lines are not part of the feeder source file, so their stop
//! sequences live here. They are added after the feeder routes.

use super::source::{RawStop, RouteSource};

/// The Red, Orange and Blue metro lines, in build order.
pub fn metro_lines() -> Vec<RouteSource> {
    vec![
        RouteSource::new(
            "Red Line",
            vec![
                RawStop::new("Saddar", 33.59844, 73.04507),
                RawStop::new("Marir Chowk", 33.60145, 73.04683),
                RawStop::new("Liaquat Bagh", 33.60577, 73.0499),
                RawStop::new("Committee Chowk", 33.61211, 73.05473),
                RawStop::new("Warisc Khan", 33.61847, 73.05955),
                RawStop::new("Rehmanabad", 33.62483, 73.06437),
                RawStop::new("6th Road", 33.6312, 73.06919),
                RawStop::new("Shamsabad", 33.63756, 73.07401),
                RawStop::new("Faizabad", 33.66682, 73.08816),
                RawStop::new("IJP", 33.65156, 73.07972),
                RawStop::new("Potohar", 33.65701, 73.07603),
                RawStop::new("Khayaban-e-Johar", 33.66246, 73.07233),
                RawStop::new("Faiz Ahmad Faiz", 33.67931, 73.05161),
                RawStop::new("Kashmir Highway", 33.68389, 73.04766),
                RawStop::new("Chaman", 33.68911, 73.04359),
                RawStop::new("Ibn-e-Sina", 33.69583, 73.03858),
                RawStop::new("Katchery", 33.71167, 73.03968),
                RawStop::new("PIMS", 33.70615, 73.05207),
                RawStop::new("Stock Exchange", 33.70924, 73.05386),
                RawStop::new("7th Avenue", 33.71233, 73.05565),
                RawStop::new("Shaheed-e-Millat", 33.71542, 73.05744),
                RawStop::new("Parade Ground", 33.71851, 73.05923),
                RawStop::new("Secretariat", 33.7216, 73.06102),
            ],
        ),
        RouteSource::new(
            "Orange Line",
            vec![
                RawStop::new("Peshawar Mor", 33.65083, 72.98794),
                RawStop::new("Faiz Ahmad Faiz", 33.67931, 73.05161),
                RawStop::new("NUST", 33.65616, 72.99355),
                RawStop::new("Police Foundation", 33.66401, 73.00666),
                RawStop::new("G-10", 33.66812, 73.012),
                RawStop::new("G-11", 33.67001, 72.9987),
                RawStop::new("Golra", 33.68933, 72.98238),
                RawStop::new("N5", 33.70, 72.97),
                RawStop::new("Airport", 33.61667, 72.98333),
            ],
        ),
        RouteSource::new(
            "Blue Line",
            vec![
                RawStop::new("PIMS", 33.70615, 73.05207),
                RawStop::new("G-7", 33.69967, 73.04819),
                RawStop::new("G-6", 33.71279, 73.08047),
                RawStop::new("Melody", 33.71518, 73.08434),
                RawStop::new("Aabpara", 33.71007, 73.09164),
                RawStop::new("Ataturk Avenue", 33.71700, 73.09200),
                RawStop::new("F-6", 33.72400, 73.09000),
                RawStop::new("F-7", 33.72238, 73.05763),
                RawStop::new("Blue Area", 33.71500, 73.08500),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_valid() {
        let lines = metro_lines();
        assert_eq!(lines.len(), 3);
        for (i, line) in lines.iter().enumerate() {
            line.validate(i).unwrap();
            assert!(line.stops.iter().all(|s| s.coordinate().is_some()));
        }
    }

    #[test]
    fn build_order() {
        let names: Vec<_> = metro_lines().into_iter().map(|l| l.route_id).collect();
        assert_eq!(names, ["Red Line", "Orange Line", "Blue Line"]);
    }

    #[test]
    fn interchanges_share_names() {
        let lines = metro_lines();
        let on = |line: usize, name: &str| lines[line].stops.iter().any(|s| s.name == name);

        assert!(on(0, "PIMS") && on(2, "PIMS"));
        assert!(on(0, "Faiz Ahmad Faiz") && on(1, "Faiz Ahmad Faiz"));
    }
}
