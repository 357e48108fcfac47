pub mod mock_asr;
