use crate::locations::is_location_name;
use crate::snapshot::MonitoredEntity;

/// Non-group entities split into points of presence and core services.
#[derive(Debug, Default)]
pub struct Classification<'a> {
    pub locations: Vec<&'a MonitoredEntity>,
    pub services: Vec<&'a MonitoredEntity>,
}

/// Partition entities by name pattern. Group containers land in neither list.
pub fn classify_entities(entities: &[MonitoredEntity]) -> Classification<'_> {
    let mut classification = Classification::default();

    for entity in entities.iter().filter(|e| !e.is_group) {
        if is_location_name(&entity.name) {
            classification.locations.push(entity);
        } else {
            classification.services.push(entity);
        }
    }

    classification
}
