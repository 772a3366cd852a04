use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};

use crate::DerivedRecord;

/// The route as a LineString, plus start and end markers. No features for an empty journey, and
/// no LineString for a single sample.
pub fn route_feature_collection(records: &[DerivedRecord]) -> GeoJson {
    let mut features = Vec::new();

    if records.len() > 1 {
        let mut feature = new_feature(Value::LineString(
            records
                .iter()
                .map(|r| vec![r.longitude, r.latitude])
                .collect(),
        ));
        feature.set_property("type", "route");
        if let Some(last) = records.last() {
            feature.set_property("distance_km", last.cumulative_distance_km);
        }
        features.push(feature);
    }

    for (kind, record) in [("start", records.first()), ("end", records.last())] {
        if let Some(record) = record {
            let mut feature =
                new_feature(Value::Point(vec![record.longitude, record.latitude]));
            feature.set_property("type", kind);
            feature.set_property("label", record.label.clone());
            feature.set_property("time", record.timestamp.to_string());
            features.push(feature);
        }
    }

    GeoJson::FeatureCollection(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

fn new_feature(value: Value) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: None,
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{derive, parse, EngineConfig};

    #[test]
    fn route_and_markers() {
        let raw = "a\t2024-07-09 04:27:31.270921\t30.0\t-97.0\n\
                   b\t2024-07-09 04:37:31.270921\t30.1\t-97.0\n\
                   c\t2024-07-09 04:47:31.270921\t30.1\t-97.1\n";
        let records = derive(&parse(raw).unwrap(), &EngineConfig::default()).unwrap();
        let GeoJson::FeatureCollection(fc) = route_feature_collection(&records) else {
            panic!("not a FeatureCollection");
        };
        assert_eq!(fc.features.len(), 3);

        match &fc.features[0].geometry.as_ref().unwrap().value {
            Value::LineString(pts) => {
                assert_eq!(pts.len(), 3);
                assert_eq!(pts[2], vec![-97.1, 30.1]);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            fc.features[1].property("label").and_then(|v| v.as_str()),
            Some("a")
        );
        assert_eq!(
            fc.features[2].property("type").and_then(|v| v.as_str()),
            Some("end")
        );
    }

    #[test]
    fn single_sample_has_only_markers() {
        let records = derive(
            &parse("a\t2024-07-09 04:27:31.270921\t30.0\t-97.0").unwrap(),
            &EngineConfig::default(),
        )
        .unwrap();
        let GeoJson::FeatureCollection(fc) = route_feature_collection(&records) else {
            panic!("not a FeatureCollection");
        };
        assert_eq!(fc.features.len(), 2);
        assert!(route_feature_collection(&[]).to_string().contains("\"features\":[]"));
    }
}
