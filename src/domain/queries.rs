//! Aggregate and filter helpers over a collection of services.

use crate::domain::model::Service;

/// Mean years of experience across instructors, `None` when there are none.
pub fn average_experience<'a, I>(services: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Service>,
{
    let (count, total) = services
        .into_iter()
        .filter_map(Service::as_instructor)
        .fold((0u64, 0u64), |(count, total), instructor| {
            (count + 1, total + u64::from(instructor.years_experience))
        });

    (count > 0).then(|| total as f64 / count as f64)
}

/// Tags whose kind matches exactly (case-sensitive).
pub fn tags_by_kind<'a, I>(services: I, kind: &str) -> Vec<Service>
where
    I: IntoIterator<Item = &'a Service>,
{
    services
        .into_iter()
        .filter(|service| service.as_tag().is_some_and(|tag| tag.kind == kind))
        .cloned()
        .collect()
}

pub fn all_regulations<'a, I>(services: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Service>,
{
    services
        .into_iter()
        .filter_map(Service::as_protocol)
        .map(|protocol| protocol.regulations.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{NewService, ServiceId};
    use chrono::Utc;

    fn catalog() -> Vec<Service> {
        let now = Utc::now();
        vec![
            NewService::plain("Yoga", ""),
            NewService::instructor("Climbing", "", "Bouldering", 4),
            NewService::instructor("Surf", "", "Longboard", 9),
            NewService::tag("Harness", "", "safety", "S-1"),
            NewService::tag("Mat", "", "equipment", "E-1"),
            NewService::tag("Rope", "", "Safety", "S-2"),
            NewService::tag("Helmet", "", "safety", "S-3"),
            NewService::protocol("Diving", "", "advanced", "Never dive alone"),
            NewService::protocol("Swim", "", "basic", "Never dive alone"),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, new)| Service::from_new(ServiceId(i as u64 + 1), now, new))
        .collect()
    }

    #[test]
    fn test_average_experience() {
        let services = catalog();
        assert_eq!(average_experience(&services), Some(6.5));
    }

    #[test]
    fn test_average_experience_without_instructors() {
        let services: Vec<Service> = catalog()
            .into_iter()
            .filter(|s| s.as_instructor().is_none())
            .collect();
        assert_eq!(average_experience(&services), None);
        assert_eq!(average_experience(&Vec::<Service>::new()), None);
    }

    #[test]
    fn test_tags_by_kind_is_exact() {
        let services = catalog();
        let names: Vec<String> = tags_by_kind(&services, "safety")
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Harness", "Helmet"]);
        assert!(tags_by_kind(&services, "safe").is_empty());
        assert!(tags_by_kind(&services, "Yoga").is_empty());
    }

    #[test]
    fn test_all_regulations_keeps_duplicates() {
        let services = catalog();
        assert_eq!(
            all_regulations(&services),
            vec!["Never dive alone".to_string(), "Never dive alone".to_string()]
        );
    }
}
