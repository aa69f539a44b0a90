/// HubSpot 批次建立 API 單次請求的上限
pub const HUBSPOT_BATCH_SIZE: usize = 100;

/// 依序切成大小不超過 chunk_size 的批次，串接後順序不變
pub fn chunk_records<T>(records: Vec<T>, chunk_size: usize) -> Vec<Vec<T>> {
    assert!(chunk_size > 0, "chunk_size must be positive");

    let mut batches = Vec::with_capacity(records.len().div_ceil(chunk_size));
    let mut current = Vec::with_capacity(chunk_size.min(records.len()));

    for record in records {
        current.push(record);
        if current.len() == chunk_size {
            batches.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        batches.push(current);
    }

    batches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_into_batches_of_ten() {
        let data: Vec<i32> = (0..25).collect();

        let chunks = chunk_records(data, 10);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 10);
        assert_eq!(chunks[1].len(), 10);
        assert_eq!(chunks[2].len(), 5);
    }

    #[test]
    fn test_concatenation_reproduces_input_order() {
        let data: Vec<i32> = (0..37).collect();

        let chunks = chunk_records(data.clone(), 7);
        let rebuilt: Vec<i32> = chunks.into_iter().flatten().collect();

        assert_eq!(rebuilt, data);
    }

    #[test]
    fn test_empty_input_produces_zero_batches() {
        let chunks = chunk_records(Vec::<i32>::new(), HUBSPOT_BATCH_SIZE);
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_exact_multiple_has_no_short_batch() {
        let data: Vec<i32> = (0..20).collect();

        let chunks = chunk_records(data, 10);

        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.len() == 10));
    }

    #[test]
    fn test_single_batch_when_under_limit() {
        let data: Vec<i32> = (0..2).collect();

        let chunks = chunk_records(data, HUBSPOT_BATCH_SIZE);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 2);
    }
}
