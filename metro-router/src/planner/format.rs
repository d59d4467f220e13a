//! Rider-facing step formatting.
//!
//! Consecutive hops on the same route become a single step. A route that is
//! left and later re-boarded produces a separate step each time.

use std::fmt;

use crate::domain::RouteId;

use super::search::PathHop;

/// A run of consecutive hops on one route.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub route: RouteId,
    pub from: String,
    pub to: String,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {} → {}", self.route, self.from, self.to)
    }
}

/// Merge consecutive same-route hops into steps.
pub fn merge_hops(hops: &[PathHop]) -> Vec<Step> {
    let mut steps: Vec<Step> = Vec::new();

    for hop in hops {
        match steps.last_mut() {
            Some(current) if current.route == hop.route => {
                current.to = hop.to_name.clone();
            }
            _ => steps.push(Step {
                route: hop.route.clone(),
                from: hop.from_name.clone(),
                to: hop.to_name.clone(),
            }),
        }
    }

    steps
}

/// Format hops as `"<route> from <from> → <to>"` strings.
pub fn format_path(hops: &[PathHop]) -> Vec<String> {
    merge_hops(hops).iter().map(Step::to_string).collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::StopId;
    use proptest::prelude::*;

    fn hops() -> impl Strategy<Value = Vec<PathHop>> {
        proptest::collection::vec("R[1-3]", 0..20).prop_map(|routes| {
            routes
                .into_iter()
                .enumerate()
                .map(|(i, route)| PathHop {
                    from: StopId::new(format!("s{i}")),
                    to: StopId::new(format!("s{}", i + 1)),
                    from_name: format!("S{i}"),
                    to_name: format!("S{}", i + 1),
                    route: RouteId::new(route),
                    weight: 1.0,
                })
                .collect()
        })
    }

    proptest! {
        /// Never more steps than hops.
        #[test]
        fn no_more_steps_than_hops(hops in hops()) {
            prop_assert!(merge_hops(&hops).len() <= hops.len());
            prop_assert_eq!(format_path(&hops).len(), merge_hops(&hops).len());
        }

        /// Neighbouring steps never share a route.
        #[test]
        fn neighbours_differ(hops in hops()) {
            let steps = merge_hops(&hops);
            for pair in steps.windows(2) {
                prop_assert_ne!(&pair[0].route, &pair[1].route);
            }
        }

        /// Steps chain: each starts where the previous one ended, and the
        /// whole sequence spans the path.
        #[test]
        fn steps_chain(hops in hops()) {
            let steps = merge_hops(&hops);
            for pair in steps.windows(2) {
                prop_assert_eq!(&pair[0].to, &pair[1].from);
            }
            if let (Some(first), Some(last)) = (hops.first(), hops.last()) {
                prop_assert_eq!(&steps[0].from, &first.from_name);
                prop_assert_eq!(&steps[steps.len() - 1].to, &last.to_name);
            }
        }
    }
}
