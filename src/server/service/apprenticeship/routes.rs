//! GOV.UK apprenticeship routes scraped for listings.

/// Search results filtered to degree level (6+) apprenticeships anywhere in the UK.
const SEARCH_URL: &str = "https://www.findapprenticeship.service.gov.uk/apprenticeships?sort=DistanceAsc&searchTerm=&location=&distance=all&levelIds=6&routeIds=";

/// Prefix for the relative listing links found on results pages.
pub const LISTING_BASE_URL: &str = "https://www.findapprenticeship.service.gov.uk";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub id: u32,
    pub name: &'static str,
}

impl Route {
    /// URL of results page `page`, starting at 1.
    pub fn page_url(&self, page: u32) -> String {
        format!("{}{}&pageNumber={}", SEARCH_URL, self.id, page)
    }
}

/// Every route in route id order.
pub const ROUTES: [Route; 15] = [
    Route { id: 1, name: "Agriculture, environmental and animal care" },
    Route { id: 2, name: "Business and administration" },
    Route { id: 3, name: "Care services" },
    Route { id: 4, name: "Catering and hospitality" },
    Route { id: 5, name: "Construction and the built environment" },
    Route { id: 6, name: "Creative and design" },
    Route { id: 7, name: "Digital" },
    Route { id: 8, name: "Education and early years" },
    Route { id: 9, name: "Engineering and manufacturing" },
    Route { id: 10, name: "Hair and beauty" },
    Route { id: 11, name: "Health and science" },
    Route { id: 12, name: "Legal, finance and accounting" },
    Route { id: 13, name: "Protective services" },
    Route { id: 14, name: "Sales, marketing and procurement" },
    Route { id: 15, name: "Transport and logistics" },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::category_group::CategoryGroup;

    #[test]
    fn page_url_carries_route_and_page() {
        assert!(ROUTES[6]
            .page_url(3)
            .ends_with("levelIds=6&routeIds=7&pageNumber=3"));
    }

    #[test]
    fn every_route_maps_to_a_group() {
        for route in ROUTES {
            assert!(
                !CategoryGroup::map_category(route.name).is_empty(),
                "{} has no group",
                route.name
            );
        }
    }
}
