//! Contract addresses and `sol!`-generated bindings.

use alloy::primitives::{address, Address};
use alloy::sol;

/// SafeStaking fee-collecting wrapper contract (Ethereum mainnet).
pub const SAFE_STAKING_ADDRESS: Address = address!("0x0D9EfFbc5D0C09d7CAbDc5d052250aDd25EcC19f");

/// Lido stETH token contract (Ethereum mainnet). The wrapper forwards stakes
/// here; the same address serves the ERC20 balance reads.
pub const STETH_ADDRESS: Address = address!("0xae7ab96520DE3A18E5e111B5EaAb095312D7fE84");

sol! {
    #[sol(rpc)]
    interface ISafeStaking {
        function stake() external payable;
        function calculateFee(uint256 ethAmount) external view returns (uint256 feeAmount, uint256 stakeAmount);
        function getUserStats(address user) external view returns (uint256 stakedAmount, uint256 feePaid, uint256 stethReceived);
        function getContractStats() external view returns (uint256 totalStaked, uint256 totalFeesCollected, uint256 totalStethDistributed, uint256 totalUsers, uint256 currentFeeBps, address feeReceiver);
    }

    #[sol(rpc)]
    interface ILido {
        function balanceOf(address account) external view returns (uint256);
        function submit(address referral) external payable returns (uint256);
        function getTotalPooledEther() external view returns (uint256);
        function getTotalShares() external view returns (uint256);
    }
}
