//! # Selection Service
//!
//! 候補からの一様ランダム選択

use rand::Rng;

use crate::domain::entities::Asset;

/// 選択サービス
///
/// 重み付けなし、リトライなし。インデックスを一様に1つ選ぶだけ
pub struct SelectionService;

impl SelectionService {
    /// 候補から1つをランダムに選ぶ
    ///
    /// # Returns
    ///
    /// 候補が空の場合は `None`
    pub fn pick_random<'a, R: Rng>(
        candidates: &'a [Asset],
        rng: &mut R,
    ) -> Option<&'a Asset> {
        if candidates.is_empty() {
            return None;
        }
        let index = rng.random_range(0..candidates.len());
        candidates.get(index)
    }
}
