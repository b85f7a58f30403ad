use std::collections::BTreeMap;

use super::model::{GroupColumn, GroupKey, MetricColumn, TrackTable};

/// One point of the grouped line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean {
    pub key: GroupKey,
    /// `NaN` when every value in the group is missing.
    pub mean: f64,
}

/// Mean of `metric` per distinct value of `group`, ascending by key.
///
/// Every distinct non-missing key in the table appears exactly once,
/// including groups whose metric values are all missing. Rows with a missing
/// key (empty cell) belong to no group.
pub fn aggregate(table: &TrackTable, group: GroupColumn, metric: MetricColumn) -> Vec<GroupMean> {
    let mut partitions: BTreeMap<GroupKey, (f64, usize)> = BTreeMap::new();

    for record in &table.records {
        let key = record.group_key(group);
        if key.is_missing() {
            continue;
        }
        let (sum, count) = partitions.entry(key).or_default();
        let value = record.metric(metric);
        if !value.is_nan() {
            *sum += value;
            *count += 1;
        }
    }

    partitions
        .into_iter()
        .map(|(key, (sum, count))| GroupMean {
            key,
            mean: if count == 0 { f64::NAN } else { sum / count as f64 },
        })
        .collect()
}
